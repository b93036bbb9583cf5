//! Integration tests for the vcaudit HTTP API.

use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use vcaudit_core::ValuationEngine;
use vcaudit_store::RunStore;
use vcaudit_web::{build_router, with_middleware, AppState, ServerConfig};

fn test_app() -> Router {
    let store = RunStore::open_in_memory().expect("in-memory store");
    build_router(AppState::new(ValuationEngine::default(), store))
}

fn scenario_a() -> Value {
    json!({
        "company_name": "Basis AI",
        "methodology": "last_round_market_adjusted",
        "as_of_date": "2026-02-18",
        "inputs": {
            "last_post_money_valuation": 100000000,
            "last_round_date": "2024-06-30",
            "public_index": "NASDAQ_COMPOSITE"
        }
    })
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let json = serde_json::from_slice(&body).expect("json body");
    (status, json)
}

fn post(uri: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.into())
        .expect("request")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

#[tokio::test]
async fn health_reports_ok() {
    let app = test_app();
    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn value_returns_result_without_storing() {
    let app = test_app();

    let (status, body) = send(&app, post("/value", scenario_a().to_string())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["valuation_result"]["estimated_fair_value"]["amount"],
        json!(120831065.39)
    );

    let (_, runs) = send(&app, get("/api/runs")).await;
    assert_eq!(runs, json!([]));
}

#[tokio::test]
async fn api_value_persists_and_run_can_be_fetched() {
    let app = test_app();

    // Given: a stored valuation
    let (status, body) = send(&app, post("/api/value", scenario_a().to_string())).await;
    assert_eq!(status, StatusCode::OK);
    let request_id = body["audit_metadata"]["request_id"]
        .as_str()
        .expect("request id")
        .to_owned();

    // When: the runs are listed and the run is fetched
    let (status, runs) = send(&app, get("/api/runs?limit=10")).await;
    assert_eq!(status, StatusCode::OK);
    let (status, stored) = send(&app, get(&format!("/api/runs/{request_id}"))).await;

    // Then: both reflect the stored result
    assert_eq!(runs.as_array().expect("list").len(), 1);
    assert_eq!(runs[0]["request_id"], json!(request_id));
    assert_eq!(runs[0]["company_name"], "Basis AI");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stored, body);
}

#[tokio::test]
async fn unknown_run_is_404() {
    let app = test_app();
    let (status, body) = send(&app, get("/api/runs/does-not-exist")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Run not found" }));
}

#[tokio::test]
async fn malformed_json_is_400() {
    let app = test_app();
    let (status, body) = send(&app, post("/value", "{not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]
        .as_str()
        .expect("message")
        .starts_with("Invalid JSON: "));
}

#[tokio::test]
async fn validation_failures_are_400() {
    let app = test_app();
    let mut request = scenario_a();
    request["methodology"] = json!("dcf");

    let (status, body) = send(&app, post("/value", request.to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]
        .as_str()
        .expect("message")
        .contains("Available: comparable_companies, last_round_market_adjusted"));
}

#[tokio::test]
async fn data_source_failures_are_400_and_not_stored() {
    let app = test_app();
    let mut request = scenario_a();
    request["inputs"]["public_index"] = json!("DOW_JONES");

    let (status, body) = send(&app, post("/api/value", request.to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "unknown index 'DOW_JONES'" }));

    let (_, runs) = send(&app, get("/api/runs")).await;
    assert_eq!(runs, json!([]));
}

#[tokio::test]
async fn unknown_route_is_404() {
    let app = test_app();
    let (status, body) = send(&app, get("/nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not found");
}

#[tokio::test]
async fn slow_requests_time_out_with_json_error() {
    // Given: a route that outlives the configured request timeout
    let slow = Router::new().route(
        "/slow",
        axum::routing::get(|| async {
            tokio::time::sleep(Duration::from_millis(500)).await;
            "late"
        }),
    );
    let config = ServerConfig {
        request_timeout: Duration::from_millis(20),
        ..ServerConfig::default()
    };
    let app = with_middleware(slow, &config);

    // When: it is called
    let (status, body) = send(&app, get("/slow")).await;

    // Then: the timeout surfaces in the usual error shape
    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
    assert_eq!(body, json!({ "error": "Request timed out" }));
}
