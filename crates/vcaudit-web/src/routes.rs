//! HTTP API routes.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use vcaudit_core::{ValuationEngine, ValuationResult, ENGINE_VERSION};
use vcaudit_store::{RunStore, RunSummary, DEFAULT_LIST_LIMIT};

use crate::error::ApiError;

/// Shared handles for request handlers.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ValuationEngine>,
    pub store: Arc<RunStore>,
}

impl AppState {
    pub fn new(engine: ValuationEngine, store: RunStore) -> Self {
        Self {
            engine: Arc::new(engine),
            store: Arc::new(store),
        }
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // Stateless valuation
        .route("/value", post(value))
        // Valuation with audit trail
        .route("/api/value", post(value_and_store))
        .route("/api/runs", get(list_runs))
        .route("/api/runs/:id", get(get_run))
        .fallback(not_found)
        .with_state(state)
}

async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "vcaudit",
        "version": ENGINE_VERSION
    }))
}

async fn value(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ValuationResult>, ApiError> {
    let payload = parse_body(&body)?;
    let result = state.engine.evaluate_value(&payload)?;
    Ok(Json(result))
}

async fn value_and_store(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let payload = parse_body(&body)?;
    let result = state
        .engine
        .evaluate_value(&payload)
        .map_err(ApiError::from)?
        .to_json_value()
        .map_err(|err| ApiError::Core(err.into()))?;

    let store = Arc::clone(&state.store);
    let stored = result.clone();
    tokio::task::spawn_blocking(move || store.save(&stored)).await??;

    Ok(Json(result))
}

#[derive(Debug, Deserialize)]
struct ListRunsQuery {
    limit: Option<usize>,
}

async fn list_runs(
    State(state): State<AppState>,
    Query(query): Query<ListRunsQuery>,
) -> Result<Json<Vec<RunSummary>>, ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_LIST_LIMIT);
    let store = Arc::clone(&state.store);
    let runs = tokio::task::spawn_blocking(move || store.list_recent(limit)).await??;
    Ok(Json(runs))
}

async fn get_run(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let store = Arc::clone(&state.store);
    tokio::task::spawn_blocking(move || store.get(&id))
        .await??
        .map(Json)
        .ok_or(ApiError::RunNotFound)
}

async fn not_found() -> ApiError {
    ApiError::RouteNotFound
}

fn parse_body(body: &[u8]) -> Result<Value, ApiError> {
    serde_json::from_slice(body).map_err(|err| ApiError::InvalidJson(err.to_string()))
}
