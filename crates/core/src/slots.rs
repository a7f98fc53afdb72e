//! Slot generation: enumerate candidate delivery slots from a calendar.
//!
//! [`SlotIter`] walks forward from the earliest eligible date one day at a
//! time, skipping days the calendar rules out, and emits one
//! [`DeliverySlot`] per time window on each qualifying day. The walk is
//! lazy and bounded by a hard search horizon, so callers may take any
//! prefix without unbounded work and repeated iteration over the same
//! inputs yields the same slots.

use chrono::{Days, NaiveDate};
use serde::{Serialize, Serializer};

use crate::calendar::{StoreCalendar, TimeWindow};
use crate::format::format_slot;

/// Hard bound on the forward scan, in days past the earliest eligible date.
///
/// Reaching the horizon with too few (or zero) matches is not an error;
/// the scan simply ends. The bound guarantees termination for calendars
/// whose rules never match.
pub const SEARCH_HORIZON_DAYS: u32 = 90;

/// Default number of delivery dates offered per request.
pub const DEFAULT_MAX_RESULTS: usize = 5;

/// One concrete delivery offer: a date, a time window, and its rendered
/// form.
///
/// Value type: equality is by field values, and a slot is immutable once
/// produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliverySlot {
    date: NaiveDate,
    #[serde(serialize_with = "serialize_time_range")]
    time_range: TimeWindow,
    formatted: String,
}

impl DeliverySlot {
    /// Build a slot for `date` and `time_range`, deriving its rendered form.
    #[must_use]
    pub fn new(date: NaiveDate, time_range: TimeWindow) -> Self {
        let formatted = format_slot(date, time_range);
        Self {
            date,
            time_range,
            formatted,
        }
    }

    /// Delivery date.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Delivery time window.
    #[must_use]
    pub const fn time_range(&self) -> TimeWindow {
        self.time_range
    }

    /// Human-readable rendering of the slot.
    #[must_use]
    pub fn formatted(&self) -> &str {
        &self.formatted
    }
}

/// Serialize a window as `["HH:MM", "HH:MM"]` (the wire contract).
fn serialize_time_range<S>(window: &TimeWindow, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    use serde::ser::SerializeTuple;

    let mut tuple = serializer.serialize_tuple(2)?;
    tuple.serialize_element(&window.start().format("%H:%M").to_string())?;
    tuple.serialize_element(&window.end().format("%H:%M").to_string())?;
    tuple.end()
}

/// Lazy, horizon-bounded iterator over a store's candidate slots.
///
/// Days `earliest ..= earliest + SEARCH_HORIZON_DAYS` are examined in
/// order. A day qualifies if its weekday is an operating day and it is not
/// a blackout date; each qualifying day yields one slot per window in
/// declared order (per-date overrides replace the default windows).
#[derive(Debug, Clone)]
pub struct SlotIter<'a> {
    calendar: &'a StoreCalendar,
    earliest: NaiveDate,
    day_offset: u32,
    window_index: usize,
}

impl<'a> SlotIter<'a> {
    /// Start a scan at `earliest` under `calendar`'s rules.
    #[must_use]
    pub const fn new(earliest: NaiveDate, calendar: &'a StoreCalendar) -> Self {
        Self {
            calendar,
            earliest,
            day_offset: 0,
            window_index: 0,
        }
    }
}

impl Iterator for SlotIter<'_> {
    type Item = DeliverySlot;

    fn next(&mut self) -> Option<Self::Item> {
        while self.day_offset <= SEARCH_HORIZON_DAYS {
            let date = self
                .earliest
                .checked_add_days(Days::new(u64::from(self.day_offset)))?;

            if self.calendar.is_deliverable(date) {
                if let Some(window) = self.calendar.windows_for(date).get(self.window_index) {
                    self.window_index += 1;
                    return Some(DeliverySlot::new(date, *window));
                }
            }

            self.day_offset += 1;
            self.window_index = 0;
        }
        None
    }
}

/// Enumerate at most `max_results` slots starting from `earliest_date`.
///
/// The sequence is finite (bounded by `max_results` and
/// [`SEARCH_HORIZON_DAYS`]), restartable, and side-effect free: repeated
/// calls with identical inputs yield identical slots.
pub fn generate(
    earliest_date: NaiveDate,
    calendar: &StoreCalendar,
    max_results: usize,
) -> std::iter::Take<SlotIter<'_>> {
    SlotIter::new(earliest_date, calendar).take(max_results)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{NaiveTime, Weekday};

    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn window(start_h: u32, end_h: u32) -> TimeWindow {
        TimeWindow::new(time(start_h, 0), time(end_h, 0)).unwrap()
    }

    fn wed_fri_calendar() -> StoreCalendar {
        StoreCalendar::new(
            "STORE001",
            time(14, 0),
            0,
            [Weekday::Wed, Weekday::Fri],
            vec![window(12, 20)],
        )
        .unwrap()
    }

    #[test]
    fn test_generate_skips_non_operating_days() {
        // 2025-06-28 is a Saturday; the next operating days are
        // Wed 2025-07-02 and Fri 2025-07-04
        let cal = wed_fri_calendar();
        let slots: Vec<_> = generate(date(2025, 6, 28), &cal, 2).collect();

        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].date(), date(2025, 7, 2));
        assert_eq!(slots[1].date(), date(2025, 7, 4));
    }

    #[test]
    fn test_generate_starts_on_qualifying_earliest_date() {
        // 2025-06-27 is a Friday
        let cal = wed_fri_calendar();
        let slots: Vec<_> = generate(date(2025, 6, 27), &cal, 1).collect();

        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].date(), date(2025, 6, 27));
        assert_eq!(slots[0].time_range(), window(12, 20));
    }

    #[test]
    fn test_generate_respects_blackout_dates() {
        let cal = wed_fri_calendar().with_blackout_dates([date(2025, 7, 2)]);
        let slots: Vec<_> = generate(date(2025, 6, 28), &cal, 1).collect();

        assert_eq!(slots[0].date(), date(2025, 7, 4));
    }

    #[test]
    fn test_generate_emits_one_slot_per_window_in_declared_order() {
        let cal = StoreCalendar::new(
            "STORE002",
            time(14, 0),
            0,
            [Weekday::Fri],
            vec![window(8, 12), window(16, 20)],
        )
        .unwrap();
        let slots: Vec<_> = generate(date(2025, 6, 27), &cal, 3).collect();

        assert_eq!(slots.len(), 3);
        assert_eq!(slots[0].date(), date(2025, 6, 27));
        assert_eq!(slots[0].time_range(), window(8, 12));
        assert_eq!(slots[1].date(), date(2025, 6, 27));
        assert_eq!(slots[1].time_range(), window(16, 20));
        assert_eq!(slots[2].date(), date(2025, 7, 4));
    }

    #[test]
    fn test_generate_uses_special_windows_override() {
        let cal = wed_fri_calendar().with_special_windows(date(2025, 7, 2), vec![window(11, 20)]);
        let slots: Vec<_> = generate(date(2025, 6, 28), &cal, 2).collect();

        assert_eq!(slots[0].date(), date(2025, 7, 2));
        assert_eq!(slots[0].time_range(), window(11, 20));
        assert_eq!(slots[1].date(), date(2025, 7, 4));
        assert_eq!(slots[1].time_range(), window(12, 20));
    }

    #[test]
    fn test_generate_ends_at_horizon_with_no_matches() {
        // Every operating day inside the horizon is blacked out
        let start = date(2025, 1, 1);
        let blackouts = (0..=SEARCH_HORIZON_DAYS)
            .filter_map(|offset| start.checked_add_days(Days::new(u64::from(offset))));
        let cal = StoreCalendar::new(
            "STORE003",
            time(14, 0),
            0,
            [
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
                Weekday::Sat,
                Weekday::Sun,
            ],
            vec![window(12, 20)],
        )
        .unwrap()
        .with_blackout_dates(blackouts);

        let slots: Vec<_> = generate(start, &cal, 5).collect();
        assert!(slots.is_empty());
    }

    #[test]
    fn test_generate_never_exceeds_horizon() {
        let start = date(2025, 1, 1);
        let cal = wed_fri_calendar();
        let horizon_end = start
            .checked_add_days(Days::new(u64::from(SEARCH_HORIZON_DAYS)))
            .unwrap();

        for slot in generate(start, &cal, usize::MAX) {
            assert!(slot.date() >= start);
            assert!(slot.date() <= horizon_end);
        }
    }

    #[test]
    fn test_iteration_is_restartable_and_idempotent() {
        let cal = wed_fri_calendar();
        let first: Vec<_> = generate(date(2025, 6, 27), &cal, 4).collect();
        let second: Vec<_> = generate(date(2025, 6, 27), &cal, 4).collect();

        assert_eq!(first, second);
    }

    #[test]
    fn test_slot_serializes_to_wire_contract() {
        let slot = DeliverySlot::new(date(2025, 6, 27), window(12, 20));
        let json = serde_json::to_value(&slot).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "date": "2025-06-27",
                "time_range": ["12:00", "20:00"],
                "formatted": "2025-06-27 from 12:00 to 20:00",
            })
        );
    }
}
