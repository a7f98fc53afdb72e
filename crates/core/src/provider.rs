//! Store calendar lookup.
//!
//! The engine treats calendar storage as an injected dependency behind
//! [`StoreCalendarProvider`]: configuration-backed, database-backed, or
//! static, the engine does not care. Lookups are pure reads.

use std::collections::HashMap;

use crate::calendar::StoreCalendar;

/// The requested store code is not registered with any provider backend.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("store not found: {store_code}")]
pub struct UnknownStoreError {
    /// The store code that failed to resolve.
    pub store_code: String,
}

impl UnknownStoreError {
    /// Create an error for the given store code.
    #[must_use]
    pub fn new(store_code: impl Into<String>) -> Self {
        Self {
            store_code: store_code.into(),
        }
    }
}

/// Read-only source of store calendars.
///
/// Implementations must be side-effect free: looking up the same store
/// code twice returns the same calendar (within one provider snapshot).
pub trait StoreCalendarProvider: Send + Sync {
    /// Resolve a store code to its delivery rules.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownStoreError`] if the code is not registered.
    fn lookup(&self, store_code: &str) -> Result<StoreCalendar, UnknownStoreError>;
}

/// In-memory provider over a fixed set of calendars.
///
/// Used as the seeded default and throughout the test suites.
#[derive(Debug, Clone, Default)]
pub struct StaticCalendarProvider {
    calendars: HashMap<String, StoreCalendar>,
}

impl StaticCalendarProvider {
    /// Build a provider from a set of calendars, keyed by their store code.
    #[must_use]
    pub fn new(calendars: impl IntoIterator<Item = StoreCalendar>) -> Self {
        Self {
            calendars: calendars
                .into_iter()
                .map(|calendar| (calendar.store_code().to_owned(), calendar))
                .collect(),
        }
    }

    /// Number of registered stores.
    #[must_use]
    pub fn len(&self) -> usize {
        self.calendars.len()
    }

    /// Whether no stores are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.calendars.is_empty()
    }
}

impl StoreCalendarProvider for StaticCalendarProvider {
    fn lookup(&self, store_code: &str) -> Result<StoreCalendar, UnknownStoreError> {
        self.calendars
            .get(store_code)
            .cloned()
            .ok_or_else(|| UnknownStoreError::new(store_code))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{NaiveTime, Weekday};

    use super::*;
    use crate::calendar::TimeWindow;

    fn calendar(store_code: &str) -> StoreCalendar {
        StoreCalendar::new(
            store_code,
            NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
            0,
            [Weekday::Fri],
            vec![
                TimeWindow::new(
                    NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
                    NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
                )
                .unwrap(),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_lookup_known_store() {
        let provider = StaticCalendarProvider::new([calendar("STORE001")]);
        let found = provider.lookup("STORE001").unwrap();
        assert_eq!(found.store_code(), "STORE001");
    }

    #[test]
    fn test_lookup_unknown_store() {
        let provider = StaticCalendarProvider::new([calendar("STORE001")]);
        let err = provider.lookup("NOPE").unwrap_err();
        assert_eq!(err.store_code, "NOPE");
        assert_eq!(err.to_string(), "store not found: NOPE");
    }

    #[test]
    fn test_lookup_is_repeatable() {
        let provider = StaticCalendarProvider::new([calendar("STORE001")]);
        assert_eq!(
            provider.lookup("STORE001").unwrap(),
            provider.lookup("STORE001").unwrap()
        );
    }
}
