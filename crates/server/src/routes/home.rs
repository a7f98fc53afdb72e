//! Welcome route handler.

use axum::Json;
use serde_json::{Value, json};

/// Welcome endpoint pointing clients at the API.
pub async fn home() -> Json<Value> {
    Json(json!({
        "message": "Welcome to the Slotwise delivery times API. Query /delivery_times/?store_code=<code>."
    }))
}
