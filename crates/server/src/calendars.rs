//! Store calendar backends for the server.
//!
//! Calendars are loaded once at startup, either from a JSON file
//! (`SLOTWISE_CALENDARS_PATH`) or from the built-in seed, and served from
//! an in-memory provider behind a `moka` cache (fixed TTL, entries swapped
//! atomically so readers always see a complete calendar).
//!
//! # File format
//!
//! ```json
//! {
//!   "stores": [
//!     {
//!       "store_code": "STORE001",
//!       "cutoff_time": "14:00",
//!       "lead_time_days": 0,
//!       "operating_days": ["wed", "fri"],
//!       "time_windows": [["12:00", "20:00"]],
//!       "blackout_dates": ["2024-07-01"],
//!       "special_windows": {"2025-07-02": [["11:00", "20:00"]]}
//!     }
//!   ]
//! }
//! ```
//!
//! Times are `HH:MM`, dates are `YYYY-MM-DD`, weekdays accept short or
//! full English names.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use chrono::{NaiveDate, NaiveTime, Weekday};
use moka::sync::Cache;
use serde::Deserialize;
use slotwise_core::{
    CalendarError, StaticCalendarProvider, StoreCalendar, StoreCalendarProvider, TimeWindow,
    UnknownStoreError,
};
use thiserror::Error;

/// Built-in calendars used when no file is configured.
///
/// Carries the reference store `STORE001`: cutoff 14:00, same-day lead
/// time, Wednesday/Friday delivery from 12:00 to 20:00, one blackout date
/// and two per-date window overrides.
const SEED_JSON: &str = r#"{
  "stores": [
    {
      "store_code": "STORE001",
      "cutoff_time": "14:00",
      "lead_time_days": 0,
      "operating_days": ["wed", "fri"],
      "time_windows": [["12:00", "20:00"]],
      "blackout_dates": ["2024-07-01"],
      "special_windows": {
        "2024-07-02": [["12:00", "16:00"]],
        "2025-07-02": [["11:00", "20:00"]]
      }
    }
  ]
}"#;

/// Errors that can occur while loading a calendars document.
#[derive(Debug, Error)]
pub enum CalendarLoadError {
    /// The file could not be read.
    #[error("failed to read calendars file: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not valid JSON of the expected shape.
    #[error("failed to parse calendars document: {0}")]
    Json(#[from] serde_json::Error),

    /// A time value did not parse as `HH:MM`.
    #[error("store {store_code}: invalid time {value:?} (expected HH:MM)")]
    InvalidTime {
        store_code: String,
        value: String,
    },

    /// A weekday name was not recognized.
    #[error("store {store_code}: invalid weekday {value:?}")]
    InvalidWeekday {
        store_code: String,
        value: String,
    },

    /// The entry violated a calendar invariant.
    #[error("store {store_code}: {source}")]
    Calendar {
        store_code: String,
        #[source]
        source: CalendarError,
    },
}

/// Raw calendars document, one entry per store.
#[derive(Debug, Deserialize)]
struct CalendarDocument {
    stores: Vec<CalendarEntry>,
}

/// Raw per-store entry; times and weekdays are parsed during conversion.
#[derive(Debug, Deserialize)]
struct CalendarEntry {
    store_code: String,
    cutoff_time: String,
    #[serde(default)]
    lead_time_days: u32,
    operating_days: Vec<String>,
    time_windows: Vec<(String, String)>,
    #[serde(default)]
    blackout_dates: Vec<NaiveDate>,
    #[serde(default)]
    special_windows: HashMap<NaiveDate, Vec<(String, String)>>,
}

impl CalendarEntry {
    fn into_calendar(self) -> Result<StoreCalendar, CalendarLoadError> {
        let code = &self.store_code;

        let cutoff_time = parse_time(code, &self.cutoff_time)?;

        let operating_days = self
            .operating_days
            .iter()
            .map(|day| parse_weekday(code, day))
            .collect::<Result<Vec<_>, _>>()?;

        let time_windows = self
            .time_windows
            .iter()
            .map(|pair| parse_window(code, pair))
            .collect::<Result<Vec<_>, _>>()?;

        let special_windows = self
            .special_windows
            .iter()
            .map(|(date, pairs)| {
                let windows = pairs
                    .iter()
                    .map(|pair| parse_window(code, pair))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok((*date, windows))
            })
            .collect::<Result<Vec<_>, CalendarLoadError>>()?;

        let mut calendar = StoreCalendar::new(
            self.store_code.clone(),
            cutoff_time,
            self.lead_time_days,
            operating_days,
            time_windows,
        )
        .map_err(|source| CalendarLoadError::Calendar {
            store_code: self.store_code.clone(),
            source,
        })?
        .with_blackout_dates(self.blackout_dates.iter().copied());

        for (date, windows) in special_windows {
            calendar = calendar.with_special_windows(date, windows);
        }

        Ok(calendar)
    }
}

fn parse_time(store_code: &str, value: &str) -> Result<NaiveTime, CalendarLoadError> {
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| CalendarLoadError::InvalidTime {
        store_code: store_code.to_owned(),
        value: value.to_owned(),
    })
}

fn parse_weekday(store_code: &str, value: &str) -> Result<Weekday, CalendarLoadError> {
    value
        .parse()
        .map_err(|_| CalendarLoadError::InvalidWeekday {
            store_code: store_code.to_owned(),
            value: value.to_owned(),
        })
}

fn parse_window(
    store_code: &str,
    (start, end): &(String, String),
) -> Result<TimeWindow, CalendarLoadError> {
    let window = TimeWindow::new(parse_time(store_code, start)?, parse_time(store_code, end)?);
    window.map_err(|source| CalendarLoadError::Calendar {
        store_code: store_code.to_owned(),
        source,
    })
}

/// Load a provider from a calendars JSON file.
///
/// # Errors
///
/// Returns [`CalendarLoadError`] if the file cannot be read, parsed, or
/// converted into valid calendars.
pub fn load_from_path(path: &Path) -> Result<StaticCalendarProvider, CalendarLoadError> {
    let document = std::fs::read_to_string(path)?;
    load_from_str(&document)
}

/// Load a provider from a calendars JSON document.
///
/// # Errors
///
/// Returns [`CalendarLoadError`] if the document cannot be parsed or
/// converted into valid calendars.
pub fn load_from_str(document: &str) -> Result<StaticCalendarProvider, CalendarLoadError> {
    let document: CalendarDocument = serde_json::from_str(document)?;
    let calendars = document
        .stores
        .into_iter()
        .map(CalendarEntry::into_calendar)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(StaticCalendarProvider::new(calendars))
}

/// The built-in seed provider.
///
/// # Errors
///
/// Returns [`CalendarLoadError`] only if the embedded seed document is
/// itself invalid, which the test suite pins against.
pub fn seeded() -> Result<StaticCalendarProvider, CalendarLoadError> {
    load_from_str(SEED_JSON)
}

/// Caching wrapper around any calendar provider.
///
/// Lookups are served from a `moka` cache with a fixed TTL; entries are
/// inserted and replaced atomically, so concurrent readers always see a
/// complete calendar snapshot and no locking is needed.
pub struct CachedCalendarProvider<P> {
    inner: P,
    cache: Cache<String, StoreCalendar>,
}

impl<P> CachedCalendarProvider<P> {
    /// Maximum number of cached calendars.
    const MAX_CAPACITY: u64 = 1000;

    /// Wrap `inner` with a cache whose entries live for `ttl`.
    pub fn new(inner: P, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(Self::MAX_CAPACITY)
            .time_to_live(ttl)
            .build();

        Self { inner, cache }
    }
}

impl<P: StoreCalendarProvider> StoreCalendarProvider for CachedCalendarProvider<P> {
    fn lookup(&self, store_code: &str) -> Result<StoreCalendar, UnknownStoreError> {
        if let Some(calendar) = self.cache.get(store_code) {
            return Ok(calendar);
        }

        // Misses are not cached: an unknown store stays a cheap map lookup
        let calendar = self.inner.lookup(store_code)?;
        self.cache.insert(store_code.to_owned(), calendar.clone());
        Ok(calendar)
    }
}
