//! Derived cycle statistics.
//!
//! Everything in here is a pure function of a user's cycle snapshot. Input
//! order is never trusted: each function sorts its own copy by start date.

pub mod history;
pub mod predictor;
pub mod risk;
pub mod stats;

use crate::models::CycleRecord;

pub use predictor::{average_cycle_length, predict_next_cycle, DEFAULT_CYCLE_LENGTH_DAYS};
pub use risk::{classify_risk, RiskAssessment, RiskColor, RiskReason, RiskTier};

/// Borrowed view of the records ordered by start date.
pub(crate) fn sorted_by_start(records: &[CycleRecord]) -> Vec<&CycleRecord> {
    let mut sorted: Vec<&CycleRecord> = records.iter().collect();
    sorted.sort_by_key(|r| r.start_date);
    sorted
}

/// Start-to-start gaps in days between chronologically consecutive cycles.
///
/// The first cycle has no predecessor, so `n` records yield `n - 1` lengths.
pub fn cycle_lengths(records: &[CycleRecord]) -> Vec<i64> {
    sorted_by_start(records)
        .windows(2)
        .map(|pair| (pair[1].start_date - pair[0].start_date).num_days())
        .collect()
}
