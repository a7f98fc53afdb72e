//! Unified error handling with Sentry integration.
//!
//! Route handlers return `Result<T, AppError>`. Every error is rendered
//! as the documented response envelope (`{"dates": [], "error": {...}}`)
//! with the appropriate status code; nothing escapes a handler uncaught.
//! Server-side errors are captured to Sentry before responding.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use slotwise_core::{ErrorInfo, InvalidRequestError, ResolutionResult};
use thiserror::Error;

/// Application-level error type for the delivery times API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed request input (missing store code, bad order_date).
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] InvalidRequestError),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry; client errors are expected traffic
        if matches!(self, Self::Internal(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Don't expose internal error details to clients
        let error = match self {
            Self::InvalidRequest(err) => ErrorInfo::from(err),
            Self::Internal(_) => ErrorInfo::new("internal", "Internal server error"),
        };

        (status, Json(ResolutionResult::failed(error))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
