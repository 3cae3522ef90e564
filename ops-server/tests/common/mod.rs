//! Shared helpers for integration tests
//!
//! Each test gets its own embedded database in a tempdir and drives the
//! real router through `tower::ServiceExt::oneshot`.

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use ops_server::core::{Config, ServerState};

/// Fresh server state over a tempdir database; keep the TempDir alive for
/// the duration of the test.
pub async fn test_state() -> (ServerState, TempDir) {
    let tmp = TempDir::new().expect("create tempdir");
    let config = Config::with_overrides(tmp.path().to_string_lossy().to_string(), 0);
    let state = ServerState::initialize(&config)
        .await
        .expect("initialize state");
    (state, tmp)
}

/// Fresh application router (and its TempDir guard)
pub async fn test_app() -> (Router, TempDir) {
    let (state, tmp) = test_state().await;
    (ops_server::api::router(state), tmp)
}

/// Send one request, returning status and parsed body
pub async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    let request = match body {
        Some(value) => builder.body(Body::from(value.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.expect("request failed");
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response is not JSON")
    };
    (status, json)
}

/// Unwrap the `data` field of a successful envelope
pub fn data(body: &serde_json::Value) -> &serde_json::Value {
    assert_eq!(
        body["success"], true,
        "expected success envelope, got: {body}"
    );
    &body["data"]
}

/// Assert a failure envelope carrying the given error code
pub fn assert_error_code(body: &serde_json::Value, code: &str) {
    assert_eq!(
        body["success"], false,
        "expected failure envelope, got: {body}"
    );
    assert_eq!(body["error"]["code"], code, "unexpected code in: {body}");
}
