use chrono::{Duration, NaiveDate};

use super::{cycle_lengths, sorted_by_start};
use crate::models::CycleRecord;

/// Cycle length assumed until two starts have been logged.
pub const DEFAULT_CYCLE_LENGTH_DAYS: i64 = 28;

/// Mean start-to-start gap, truncated toward zero. Falls back to
/// [`DEFAULT_CYCLE_LENGTH_DAYS`] with fewer than two records.
///
/// Outliers are not filtered; one anomalous entry moves the mean.
pub fn average_cycle_length(records: &[CycleRecord]) -> i64 {
    let lengths = cycle_lengths(records);
    if lengths.is_empty() {
        return DEFAULT_CYCLE_LENGTH_DAYS;
    }
    let mean = lengths.iter().sum::<i64>() as f64 / lengths.len() as f64;
    mean.trunc() as i64
}

/// Expected onset of the next cycle: the latest start plus the average
/// cycle length. `None` when nothing has been logged or the date would
/// fall past the end of the calendar.
pub fn predict_next_cycle(records: &[CycleRecord]) -> Option<NaiveDate> {
    let last_start = sorted_by_start(records).last()?.start_date;
    let average = average_cycle_length(records);
    let next = last_start.checked_add_signed(Duration::days(average))?;
    tracing::debug!(%last_start, average, %next, "predicted next cycle");
    Some(next)
}
