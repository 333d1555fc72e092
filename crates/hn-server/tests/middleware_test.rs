//! Tests de middleware.

mod helpers;

use helpers::{FakeSource, TEST_ORIGIN, TestClient, client_for};
use uuid::Uuid;

fn client() -> TestClient {
    client_for(FakeSource::with_stories(1..=3).shared())
}

// === Request ID ===

#[tokio::test]
async fn response_includes_request_id() {
    let response = client().get("/health").await;

    response.assert_header_exists("x-request-id");
}

#[tokio::test]
async fn request_id_is_uuid_v7() {
    let response = client().get("/health").await;

    let id = response.header("x-request-id").unwrap();
    let parsed = Uuid::parse_str(id).unwrap();

    assert_eq!(parsed.get_version_num(), 7);
}

#[tokio::test]
async fn propagates_incoming_request_id() {
    let custom_id = "my-custom-request-id-12345";

    let response = client()
        .get_with_headers("/health", vec![("x-request-id", custom_id)])
        .await;

    response.assert_header("x-request-id", custom_id);
}

#[tokio::test]
async fn generates_different_ids_for_each_request() {
    let client = client();
    let response1 = client.get("/health").await;
    let response2 = client.get("/health").await;

    let id1 = response1.header("x-request-id").unwrap();
    let id2 = response2.header("x-request-id").unwrap();

    assert_ne!(id1, id2);
}

#[tokio::test]
async fn request_id_present_on_errors() {
    let response = client().get("/api/stories/new?limit=0").await;

    response.assert_header_exists("x-request-id");
}

#[tokio::test]
async fn request_id_present_on_stories() {
    let response = client().get("/api/stories/new").await;

    response.assert_header_exists("x-request-id");
}

// === CORS ===

#[tokio::test]
async fn allowed_origin_is_echoed() {
    let response = client()
        .get_with_headers("/api/stories/new", vec![("origin", TEST_ORIGIN)])
        .await;

    response.assert_header("access-control-allow-origin", TEST_ORIGIN);
}

#[tokio::test]
async fn unknown_origin_gets_no_cors_header() {
    let response = client()
        .get_with_headers("/api/stories/new", vec![("origin", "https://evil.example")])
        .await;

    assert!(response.header("access-control-allow-origin").is_none());
}
