//! Store delivery calendars.
//!
//! A [`StoreCalendar`] is the full rule set for one store: which weekdays it
//! delivers on, which time windows it offers, its daily order cutoff, the
//! minimum lead time, and date-level exceptions (blackouts and per-date
//! window overrides). Calendars are immutable once built; the engine only
//! ever reads them.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};

/// Errors that can occur when building a [`StoreCalendar`] or [`TimeWindow`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    /// The window's start is not strictly before its end.
    #[error("time window must start before it ends ({start} >= {end})")]
    EmptyWindow {
        /// Window start time.
        start: NaiveTime,
        /// Window end time.
        end: NaiveTime,
    },
    /// The calendar declares no time windows.
    #[error("store calendar must declare at least one time window")]
    NoWindows,
    /// The calendar declares no operating days.
    #[error("store calendar must declare at least one operating day")]
    NoOperatingDays,
}

/// A delivery time window within a single day.
///
/// ## Constraints
///
/// - `start < end` (enforced at construction; a calendar can never hold an
///   empty or inverted window)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: NaiveTime,
    end: NaiveTime,
}

impl TimeWindow {
    /// Create a new time window.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::EmptyWindow`] unless `start < end`.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self, CalendarError> {
        if start < end {
            Ok(Self { start, end })
        } else {
            Err(CalendarError::EmptyWindow { start, end })
        }
    }

    /// Window start time.
    #[must_use]
    pub const fn start(&self) -> NaiveTime {
        self.start
    }

    /// Window end time.
    #[must_use]
    pub const fn end(&self) -> NaiveTime {
        self.end
    }
}

/// Delivery rules for a single store.
///
/// Owned and supplied by a [`StoreCalendarProvider`](crate::provider::StoreCalendarProvider);
/// the resolution engine never mutates one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreCalendar {
    store_code: String,
    cutoff_time: NaiveTime,
    lead_time_days: u32,
    operating_days: Vec<Weekday>,
    time_windows: Vec<TimeWindow>,
    blackout_dates: BTreeSet<NaiveDate>,
    special_windows: BTreeMap<NaiveDate, Vec<TimeWindow>>,
}

impl StoreCalendar {
    /// Create a calendar from its required rules.
    ///
    /// Blackout dates and per-date window overrides start empty; add them
    /// with [`with_blackout_dates`](Self::with_blackout_dates) and
    /// [`with_special_windows`](Self::with_special_windows).
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::NoOperatingDays`] or
    /// [`CalendarError::NoWindows`] if either list is empty.
    pub fn new(
        store_code: impl Into<String>,
        cutoff_time: NaiveTime,
        lead_time_days: u32,
        operating_days: impl IntoIterator<Item = Weekday>,
        time_windows: Vec<TimeWindow>,
    ) -> Result<Self, CalendarError> {
        let operating_days: Vec<Weekday> = operating_days.into_iter().collect();
        if operating_days.is_empty() {
            return Err(CalendarError::NoOperatingDays);
        }
        if time_windows.is_empty() {
            return Err(CalendarError::NoWindows);
        }

        Ok(Self {
            store_code: store_code.into(),
            cutoff_time,
            lead_time_days,
            operating_days,
            time_windows,
            blackout_dates: BTreeSet::new(),
            special_windows: BTreeMap::new(),
        })
    }

    /// Add dates on which the store never delivers, regardless of weekday.
    #[must_use]
    pub fn with_blackout_dates(mut self, dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.blackout_dates.extend(dates);
        self
    }

    /// Override the time windows offered on one specific date.
    ///
    /// The override only applies if the date qualifies for delivery in the
    /// first place (operating weekday, not blacked out). An empty window
    /// list means the store offers no slots that day.
    #[must_use]
    pub fn with_special_windows(mut self, date: NaiveDate, windows: Vec<TimeWindow>) -> Self {
        self.special_windows.insert(date, windows);
        self
    }

    /// The store code this calendar belongs to.
    #[must_use]
    pub fn store_code(&self) -> &str {
        &self.store_code
    }

    /// Daily time-of-day boundary after which orders roll to the next day.
    #[must_use]
    pub const fn cutoff_time(&self) -> NaiveTime {
        self.cutoff_time
    }

    /// Minimum whole days between order and delivery.
    #[must_use]
    pub const fn lead_time_days(&self) -> u32 {
        self.lead_time_days
    }

    /// Default time windows offered on operating days.
    #[must_use]
    pub fn time_windows(&self) -> &[TimeWindow] {
        &self.time_windows
    }

    /// Whether the store delivers on the given weekday.
    #[must_use]
    pub fn is_operating_day(&self, weekday: Weekday) -> bool {
        self.operating_days.contains(&weekday)
    }

    /// Whether the given date is excluded regardless of weekday.
    #[must_use]
    pub fn is_blackout(&self, date: NaiveDate) -> bool {
        self.blackout_dates.contains(&date)
    }

    /// Whether the given date qualifies for delivery: its weekday is an
    /// operating day and it is not a blackout date.
    #[must_use]
    pub fn is_deliverable(&self, date: NaiveDate) -> bool {
        self.is_operating_day(date.weekday()) && !self.is_blackout(date)
    }

    /// The windows offered on the given date: the per-date override if one
    /// exists, otherwise the default windows.
    #[must_use]
    pub fn windows_for(&self, date: NaiveDate) -> &[TimeWindow] {
        self.special_windows
            .get(&date)
            .map_or(self.time_windows.as_slice(), Vec::as_slice)
    }
}
