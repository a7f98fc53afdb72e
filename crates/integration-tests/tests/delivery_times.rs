//! Integration tests for the delivery times endpoint.
//!
//! These tests exercise the documented contract end to end: query
//! parsing, cutoff resolution against the seed STORE001 calendar, and
//! the bit-exact response envelope.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use serde_json::json;
use slotwise_integration_tests::{get_json, test_app};

// =============================================================================
// Success Envelope
// =============================================================================

#[tokio::test]
async fn test_after_cutoff_order_rolls_to_next_operating_day() {
    // 2025-06-27 is a Friday; 15:30 misses the 14:00 cutoff, so the order
    // rolls past Saturday and lands on Wednesday 2025-07-02, which carries
    // a special 11:00-20:00 window in the seed calendar
    let (status, body) = get_json(
        test_app(),
        "/delivery_times/?store_code=STORE001&order_date=2025-06-27T15:30",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["error"].is_null());
    assert_eq!(
        body["dates"][0],
        json!({
            "date": "2025-07-02",
            "time_range": ["11:00", "20:00"],
            "formatted": "2025-07-02 from 11:00 to 20:00",
        })
    );
}

#[tokio::test]
async fn test_before_cutoff_order_includes_same_day() {
    // Before the cutoff the order date itself qualifies, reproducing the
    // documented example output: Friday 12:00-20:00, then the special
    // Wednesday window
    let (status, body) = get_json(
        test_app(),
        "/delivery_times/?store_code=STORE001&order_date=2025-06-27T10:00",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["dates"][0],
        json!({
            "date": "2025-06-27",
            "time_range": ["12:00", "20:00"],
            "formatted": "2025-06-27 from 12:00 to 20:00",
        })
    );
    assert_eq!(
        body["dates"][1],
        json!({
            "date": "2025-07-02",
            "time_range": ["11:00", "20:00"],
            "formatted": "2025-07-02 from 11:00 to 20:00",
        })
    );
}

#[tokio::test]
async fn test_dates_are_ascending_and_unique() {
    let (_, body) = get_json(
        test_app(),
        "/delivery_times/?store_code=STORE001&order_date=2025-06-27T10:00",
    )
    .await;

    let dates: Vec<&str> = body["dates"]
        .as_array()
        .unwrap()
        .iter()
        .map(|slot| slot["date"].as_str().unwrap())
        .collect();

    assert_eq!(dates.len(), 5, "default max_results is 5 dates");
    for pair in dates.windows(2) {
        assert!(pair[0] < pair[1], "dates must be strictly ascending");
    }
}

#[tokio::test]
async fn test_dates_stay_within_earliest_date_and_horizon() {
    use chrono::{Days, NaiveDate};
    use slotwise_core::SEARCH_HORIZON_DAYS;

    // Before the 14:00 cutoff the earliest eligible date is the order date
    let earliest = NaiveDate::from_ymd_opt(2025, 6, 27).unwrap();
    let horizon_end = earliest
        .checked_add_days(Days::new(u64::from(SEARCH_HORIZON_DAYS)))
        .unwrap();

    let (_, body) = get_json(
        test_app(),
        "/delivery_times/?store_code=STORE001&order_date=2025-06-27T10:00",
    )
    .await;

    for slot in body["dates"].as_array().unwrap() {
        let date: NaiveDate = slot["date"].as_str().unwrap().parse().unwrap();
        assert!(date >= earliest);
        assert!(date <= horizon_end);
    }
}

#[tokio::test]
async fn test_resolution_is_idempotent() {
    let uri = "/delivery_times/?store_code=STORE001&order_date=2025-06-27T15:30";
    let (_, first) = get_json(test_app(), uri).await;
    let (_, second) = get_json(test_app(), uri).await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_omitted_order_date_defaults_to_now() {
    // The current instant is not pinned here, so only the envelope shape
    // is asserted; the defaulted path itself is covered deterministically
    // in the core suite via the injected clock
    let (status, body) = get_json(test_app(), "/delivery_times/?store_code=STORE001").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["error"].is_null());
    assert!(body["dates"].is_array());
}

// =============================================================================
// Error Envelope
// =============================================================================

#[tokio::test]
async fn test_unknown_store_returns_error_inside_200_envelope() {
    let (status, body) = get_json(test_app(), "/delivery_times/?store_code=NOPE").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "dates": [],
            "error": {
                "code": "unknown_store",
                "message": "store not found: NOPE",
            },
        })
    );
}

#[tokio::test]
async fn test_missing_store_code_is_bad_request() {
    let (status, body) = get_json(test_app(), "/delivery_times/").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["dates"], json!([]));
    assert_eq!(body["error"]["code"], "invalid_request");
    assert!(
        body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("store_code")
    );
}

#[tokio::test]
async fn test_malformed_order_date_is_bad_request() {
    let (status, body) = get_json(
        test_app(),
        "/delivery_times/?store_code=STORE001&order_date=tomorrow",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "invalid_request");
    assert!(
        body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("order_date")
    );
}
