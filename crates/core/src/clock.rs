//! Clock abstraction for deterministic time handling.
//!
//! The resolution engine never reads wall-clock time directly. When a
//! request omits the order timestamp, the service substitutes "now" from an
//! injected [`Clock`], so the defaulted path stays deterministic under test.

use chrono::{Local, NaiveDateTime};

/// Source of the current instant in the store's local time zone.
pub trait Clock: Send + Sync {
    /// The current local date-time.
    fn now(&self) -> NaiveDateTime;
}

/// Production clock backed by the system's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock pinned to one instant, for tests and replays.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(NaiveDateTime);

impl FixedClock {
    /// Create a clock that always reports `instant`.
    #[must_use]
    pub const fn new(instant: NaiveDateTime) -> Self {
        Self(instant)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
