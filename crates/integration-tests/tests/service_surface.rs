//! Integration tests for the service surface around the API: health,
//! welcome, and routing behavior.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use slotwise_integration_tests::{get_json, get_raw, test_app};

#[tokio::test]
async fn test_health_returns_ok() {
    let (status, body) = get_raw(test_app(), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"ok");
}

#[tokio::test]
async fn test_home_returns_welcome_message() {
    let (status, body) = get_json(test_app(), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .contains("delivery times")
    );
}

#[tokio::test]
async fn test_delivery_times_accepts_both_path_forms() {
    let with_slash = "/delivery_times/?store_code=STORE001&order_date=2025-06-27T15:30";
    let without_slash = "/delivery_times?store_code=STORE001&order_date=2025-06-27T15:30";

    let (status_a, body_a) = get_json(test_app(), with_slash).await;
    let (status_b, body_b) = get_json(test_app(), without_slash).await;

    assert_eq!(status_a, StatusCode::OK);
    assert_eq!(status_b, StatusCode::OK);
    assert_eq!(body_a, body_b);
}

#[tokio::test]
async fn test_responses_carry_a_request_id() {
    let request = axum::http::Request::builder()
        .uri("/health")
        .body(axum::body::Body::empty())
        .unwrap();

    let response = tower::ServiceExt::oneshot(test_app(), request).await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let (status, _) = get_raw(test_app(), "/delivery_windows").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
