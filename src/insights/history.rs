use chrono::{Datelike, Months, NaiveDate};

use super::sorted_by_start;
use crate::models::{CycleRecord, MonthlyDuration};

/// Longest series returned, counted back from the latest start's month.
pub const MAX_HISTORY_MONTHS: u32 = 120;

fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Flow duration per calendar month, from the month of the first logged
/// start through the month of the last one. Gaps are filled with
/// zero-duration months so the series has no holes. Only the last
/// [`MAX_HISTORY_MONTHS`] months are covered; older cycles are left out.
pub fn duration_history(records: &[CycleRecord]) -> Vec<MonthlyDuration> {
    let sorted = sorted_by_start(records);
    let (Some(first), Some(last)) = (sorted.first(), sorted.last()) else {
        return Vec::new();
    };

    let end = month_start(last.start_date);
    let window_start = end
        .checked_sub_months(Months::new(MAX_HISTORY_MONTHS - 1))
        .unwrap_or(NaiveDate::MIN);
    let first_month = month_start(first.start_date).max(window_start);
    let mut pending = sorted
        .iter()
        .skip_while(move |r| month_start(r.start_date) < first_month)
        .peekable();
    let mut month = first_month;
    let mut history = Vec::new();

    while month <= end {
        let label = month.format("%B %Y").to_string();
        let mut logged = false;
        while let Some(record) = pending.next_if(|r| month_start(r.start_date) == month) {
            logged = true;
            history.push(MonthlyDuration {
                month,
                label: label.clone(),
                start_date: Some(record.start_date),
                end_date: Some(record.end_date),
                duration: record.duration(),
            });
        }
        if !logged {
            history.push(MonthlyDuration {
                month,
                label,
                start_date: None,
                end_date: None,
                duration: 0,
            });
        }
        month = match month.checked_add_months(Months::new(1)) {
            Some(next) => next,
            None => break,
        };
    }

    history
}
