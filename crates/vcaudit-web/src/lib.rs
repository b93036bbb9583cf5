//! JSON HTTP API over the valuation engine and the run store.
//!
//! | Route | Description |
//! |-------|-------------|
//! | `GET /health` | Liveness and version |
//! | `POST /value` | Evaluate a request without persisting it |
//! | `POST /api/value` | Evaluate and store the result |
//! | `GET /api/runs?limit=N` | Most recent stored runs |
//! | `GET /api/runs/{id}` | Full stored result |
//!
//! Every failure is returned as `{"error": message}`; bad input and missing
//! reference data map to 400, unknown runs and routes to 404, anything else
//! to 500, and requests exceeding the configured timeout to 408.

pub mod config;
mod error;
mod routes;

use axum::{middleware, Router};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub use config::ServerConfig;
pub use error::ApiError;
pub use routes::{build_router, AppState};

/// Wrap `router` with the request timeout and HTTP tracing. Timed-out
/// requests answer 408 with `{"error": "Request timed out"}`.
pub fn with_middleware(router: Router, config: &ServerConfig) -> Router {
    router
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(middleware::map_response(error::timeout_as_json))
        .layer(TraceLayer::new_for_http())
}

/// Bind `config.socket_addr()` and serve until the process is stopped.
pub async fn serve(config: &ServerConfig, state: AppState) -> std::io::Result<()> {
    let app = with_middleware(build_router(state), config);

    let listener = tokio::net::TcpListener::bind(config.socket_addr()).await?;
    tracing::info!(addr = %listener.local_addr()?, "vcaudit API listening");
    axum::serve(listener, app).await
}
