//! HTTP middleware for the delivery times API.
//!
//! Only request-id correlation lives here; request tracing and CORS come
//! from `tower-http` layers assembled in [`crate::app`].

pub mod request_id;

pub use request_id::request_id_middleware;
