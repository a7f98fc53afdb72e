//! HTTP route handlers for the delivery times API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                 - Welcome message
//! GET  /health           - Health check
//! GET  /delivery_times/  - Available delivery slots for a store
//!                          (?store_code=<code>[&order_date=<iso-datetime>])
//! ```

pub mod delivery;
pub mod home;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create all routes for the delivery times API.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Welcome message
        .route("/", get(home::home))
        // The documented path carries a trailing slash; accept both forms
        .route("/delivery_times", get(delivery::delivery_times))
        .route("/delivery_times/", get(delivery::delivery_times))
}
