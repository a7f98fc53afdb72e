//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `SLOTWISE_HOST` - Bind address (default: 127.0.0.1)
//! - `SLOTWISE_PORT` - Listen port (default: 8000)
//! - `SLOTWISE_CALENDARS_PATH` - Path to a store calendars JSON file;
//!   when unset, the built-in seed calendars are used
//! - `SLOTWISE_CACHE_TTL_SECS` - Calendar cache TTL in seconds (default: 300)
//! - `SLOTWISE_MAX_RESULTS` - Delivery dates offered per request (default: 5)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use slotwise_core::DEFAULT_MAX_RESULTS;
use thiserror::Error;

const DEFAULT_CACHE_TTL_SECS: u64 = 300;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Path to the store calendars JSON file, if configured
    pub calendars_path: Option<PathBuf>,
    /// Calendar cache time-to-live in seconds
    pub cache_ttl_secs: u64,
    /// Number of delivery dates offered per request
    pub max_results: usize,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag (e.g. "production")
    pub sentry_environment: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env_or("SLOTWISE_HOST", IpAddr::from([127, 0, 0, 1]))?;
        let port = parse_env_or("SLOTWISE_PORT", 8000)?;
        let calendars_path = get_optional_env("SLOTWISE_CALENDARS_PATH").map(PathBuf::from);
        let cache_ttl_secs = parse_env_or("SLOTWISE_CACHE_TTL_SECS", DEFAULT_CACHE_TTL_SECS)?;
        let max_results = parse_env_or("SLOTWISE_MAX_RESULTS", DEFAULT_MAX_RESULTS)?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");

        Ok(Self {
            host,
            port,
            calendars_path,
            cache_ttl_secs,
            max_results,
            sentry_dsn,
            sentry_environment,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Parse an environment variable, falling back to a default when unset.
///
/// Unlike a silent `unwrap_or`, a present-but-malformed value is an error:
/// a typo in deployment config should fail startup, not be ignored.
fn parse_env_or<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(value) => value
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        Err(_) => Ok(default),
    }
}
