//! Delivery times route handler.

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::NaiveDateTime;
use serde::Deserialize;
use slotwise_core::{InvalidRequestError, ResolutionResult};
use tracing::instrument;

use crate::error::Result;
use crate::state::AppState;

/// Delivery times query parameters.
#[derive(Debug, Deserialize)]
pub struct DeliveryTimesQuery {
    /// Store to resolve slots for.
    #[serde(default)]
    pub store_code: String,
    /// Order date-time (`YYYY-MM-DDTHH:MM`, seconds optional); defaults to
    /// the current instant when absent.
    pub order_date: Option<String>,
}

/// Available delivery slots for a store.
///
/// Always responds with the result envelope: on success `error` is null,
/// for an unknown store the error travels inside a 200 envelope, and
/// malformed input gets a 400 envelope naming the offending field.
#[instrument(skip(state))]
pub async fn delivery_times(
    State(state): State<AppState>,
    Query(query): Query<DeliveryTimesQuery>,
) -> Result<Json<ResolutionResult>> {
    let order_timestamp = query
        .order_date
        .as_deref()
        .map(parse_order_date)
        .transpose()?;

    let result = state.service().resolve(&query.store_code, order_timestamp)?;
    Ok(Json(result))
}

/// Parse an `order_date` query value.
///
/// Accepts ISO-8601-like local date-times with or without seconds
/// (`2025-06-27T15:30`, `2025-06-27T15:30:00`).
fn parse_order_date(value: &str) -> std::result::Result<NaiveDateTime, InvalidRequestError> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
        .map_err(|_| InvalidRequestError::MalformedOrderDate {
            value: value.to_owned(),
        })
}
