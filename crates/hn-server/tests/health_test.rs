mod helpers;

use axum::http::StatusCode;
use helpers::{FakeSource, client_for};
use serde_json::Value;

#[tokio::test]
async fn health_check_returns_200() {
    let source = FakeSource::default().shared();
    let response = client_for(source).get("/health").await;

    response
        .assert_status(StatusCode::OK)
        .assert_content_type_contains("application/json");
}

#[tokio::test]
async fn health_check_body_contains_status_up() {
    let source = FakeSource::default().shared();
    let response = client_for(source).get("/health").await;

    let health: Value = response.json();
    assert_eq!(health["status"], "UP");
    assert_eq!(health["version"], hn_server::version());
}

#[tokio::test]
async fn health_check_does_not_touch_upstream() {
    let source = FakeSource::with_stories(1..=3).failing_list().shared();
    let response = client_for(source.clone()).get("/health").await;

    response.assert_status(StatusCode::OK);
    assert_eq!(source.list_calls(), 0);
}

#[tokio::test]
async fn metrics_endpoint_renders_prometheus_text() {
    let source = FakeSource::default().shared();
    let response = client_for(source).get("/metrics").await;

    response
        .assert_status(StatusCode::OK)
        .assert_content_type_contains("text/plain");
}
