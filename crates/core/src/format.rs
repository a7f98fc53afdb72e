//! Human-readable slot rendering.

use chrono::NaiveDate;

use crate::calendar::TimeWindow;

/// Render a slot into its canonical human-readable form.
///
/// Fixed template: `"{date} from {start} to {end}"` with the date as
/// `YYYY-MM-DD` and times as `HH:MM`. Pure function of its inputs; no
/// locale-sensitive behavior.
#[must_use]
pub fn format_slot(date: NaiveDate, window: TimeWindow) -> String {
    format!(
        "{} from {} to {}",
        date.format("%Y-%m-%d"),
        window.start().format("%H:%M"),
        window.end().format("%H:%M")
    )
}
