//! Cutoff resolution: from order timestamp to earliest eligible delivery date.

use chrono::{Days, NaiveDate, NaiveDateTime};

use crate::calendar::StoreCalendar;

/// Compute the earliest date on which an order placed at `order_timestamp`
/// could be delivered under `calendar`'s rules.
///
/// Orders placed strictly before the store's cutoff time keep their order
/// date as the base; orders at or after the cutoff roll to the next day
/// before the lead time is applied. An order at exactly the cutoff has
/// missed it.
///
/// The same rule applies whether the timestamp was supplied by the caller
/// or defaulted from the clock. Date arithmetic saturates at the calendar
/// edge rather than wrapping.
#[must_use]
pub fn earliest_eligible_date(
    order_timestamp: NaiveDateTime,
    calendar: &StoreCalendar,
) -> NaiveDate {
    let order_date = order_timestamp.date();

    let base = if order_timestamp.time() < calendar.cutoff_time() {
        order_date
    } else {
        order_date
            .checked_add_days(Days::new(1))
            .unwrap_or(NaiveDate::MAX)
    };

    base.checked_add_days(Days::new(u64::from(calendar.lead_time_days())))
        .unwrap_or(NaiveDate::MAX)
}
