//! Integration tests for Slotwise.
//!
//! The suites in `tests/` drive the full router in-process via
//! `tower::ServiceExt::oneshot` - no listener, no network, and the seed
//! calendars as the data set, so every run is hermetic and deterministic.
//!
//! # Test Categories
//!
//! - `delivery_times` - The delivery times endpoint and its envelope
//! - `service_surface` - Health, welcome, and routing behavior

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::missing_panics_doc)] // helpers panic on malformed test setup only

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use slotwise_server::config::ServerConfig;
use slotwise_server::state::AppState;
use tower::ServiceExt;

/// Configuration for an in-process test app: seed calendars, defaults,
/// no Sentry.
#[must_use]
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: std::net::IpAddr::from([127, 0, 0, 1]),
        port: 0,
        calendars_path: None,
        cache_ttl_secs: 300,
        max_results: 5,
        sentry_dsn: None,
        sentry_environment: None,
    }
}

/// Build the full application router over seed calendars.
#[must_use]
pub fn test_app() -> Router {
    let state = AppState::new(test_config()).expect("seed calendars should load");
    slotwise_server::app(state)
}

/// Issue a GET request and return the status with the JSON body.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let (status, body) = get_raw(app, uri).await;
    let json = serde_json::from_slice(&body).expect("response body should be JSON");
    (status, json)
}

/// Issue a GET request and return the status with the raw body.
pub async fn get_raw(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request should build");

    let response = app.oneshot(request).await.expect("handler is infallible");
    let status = response.status();
    let body = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes()
        .to_vec();

    (status, body)
}
