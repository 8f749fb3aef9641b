//! Router tests against a store that is never reachable.
//!
//! The pool points at a closed local port, so every endpoint that needs the
//! store has to fail with a 500 while the rest keep answering.

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use configuration::DatabaseSettings;
use database::DbRepository;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use web_server::{build_router, AppState};

const PASSWORD: &str = "s3cr3t-pw";

fn app() -> Router {
    let settings = DatabaseSettings::new(format!("postgres://sara:{}@127.0.0.1:1/geo", PASSWORD))
        .with_acquire_timeout(Duration::from_millis(500));
    let pool = database::connect(&settings).unwrap();
    build_router(Arc::new(AppState::new(DbRepository::new(pool), &settings)))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn detail(body: &str) -> String {
    let value: Value = serde_json::from_str(body).unwrap();
    value["detail"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_sample_endpoint_ignores_store() {
    let app = app();
    let (status, body) = send(&app, get("/api/coordinates/sara")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        serde_json::from_str::<Value>(&body).unwrap(),
        json!({
            "id": 16,
            "lat": 47.46385684116505,
            "lon": 8.39244934396616,
            "created_at": "2025-11-08T10:08:44.306761"
        })
    );
}

#[tokio::test]
async fn test_api_info_is_static() {
    let app = app();
    let (status, body) = send(&app, get("/api/info/api")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        serde_json::from_str::<Value>(&body).unwrap(),
        json!({ "status": "ok", "api_version": "1.0.0" })
    );
}

#[tokio::test]
async fn test_health_is_ok() {
    let (status, body) = send(&app(), get("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
}

#[tokio::test]
async fn test_insert_failure_reports_raw_error_and_server_keeps_serving() {
    let app = app();
    let (status, body) = send(
        &app,
        post_json("/api/coordinates", json!({ "lat": 47.4, "lon": 8.5 })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let detail = detail(&body);
    assert!(!detail.is_empty());
    assert!(!detail.contains(PASSWORD));

    let (status, _) = send(&app, get("/api/coordinates/sara")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_read_failures_use_fixed_messages() {
    let app = app();

    let (status, body) = send(&app, get("/api/coordinates")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(detail(&body), "Database query error");

    let (status, body) = send(&app, get("/api/info/db")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(detail(&body), "Database connection failed");
}

#[tokio::test]
async fn test_debug_failure_does_not_leak_credentials() {
    let (status, body) = send(&app(), get("/api/debug/db")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body.contains(PASSWORD));
}

#[tokio::test]
async fn test_child_endpoints_fail_with_500() {
    let app = app();
    let child = json!({ "lat": 47.4, "lon": 8.5, "user_name": "Mia", "user_function": "Scout" });
    let (status, _) = send(&app, post_json("/api/child/coordinates", child)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, body) = send(&app, get("/api/child/coordinates")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!detail(&body).is_empty());
}

#[tokio::test]
async fn test_malformed_body_is_rejected_before_the_store() {
    let app = app();
    let (status, body) = send(&app, post_json("/api/coordinates", json!({ "lat": "north" }))).await;
    assert!(status.is_client_error());
    assert!(!detail(&body).is_empty());
}

#[tokio::test]
async fn test_cors_allows_any_origin_with_credentials() {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/coordinates")
        .header(header::ORIGIN, "https://map.example.org")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type,x-custom")
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    let headers = response.headers();

    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "https://map.example.org"
    );
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
        "true"
    );
}

#[tokio::test]
async fn test_debug_url_masks_query_password() {
    let settings = DatabaseSettings::new(format!(
        "postgres://sara@127.0.0.1:1/geo?sslmode=disable&password={}",
        PASSWORD
    ));
    let pool = database::connect(&settings).unwrap();
    let state = AppState::new(DbRepository::new(pool), &settings);

    assert!(!state.connection_url.contains(PASSWORD));
    assert!(state.connection_url.contains("password=***"));
}
