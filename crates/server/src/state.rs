//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use slotwise_core::{ResolutionService, StaticCalendarProvider, SystemClock};

use crate::calendars::{self, CachedCalendarProvider, CalendarLoadError};
use crate::config::ServerConfig;

/// The calendar backend wired into the server: startup-loaded calendars
/// behind the TTL cache.
pub type CalendarBackend = CachedCalendarProvider<StaticCalendarProvider>;

/// The resolution service as configured for this process.
pub type Resolver = ResolutionService<CalendarBackend, SystemClock>;

/// Error building the application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("calendar setup failed: {0}")]
    Calendars(#[from] CalendarLoadError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration and the resolution service.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    service: Resolver,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Loads calendars from `config.calendars_path` when set, otherwise
    /// from the built-in seed, and wires them through the TTL cache into
    /// the resolution service.
    ///
    /// # Errors
    ///
    /// Returns an error if the calendars document cannot be loaded.
    pub fn new(config: ServerConfig) -> Result<Self, StateError> {
        let provider = match config.calendars_path.as_deref() {
            Some(path) => calendars::load_from_path(path)?,
            None => calendars::seeded()?,
        };
        tracing::info!(stores = provider.len(), "Calendars loaded");

        let cached =
            CachedCalendarProvider::new(provider, Duration::from_secs(config.cache_ttl_secs));
        let service =
            ResolutionService::new(cached, SystemClock).with_max_results(config.max_results);

        Ok(Self {
            inner: Arc::new(AppStateInner { config, service }),
        })
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the resolution service.
    #[must_use]
    pub fn service(&self) -> &Resolver {
        &self.inner.service
    }
}
