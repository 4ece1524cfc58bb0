use super::{history::duration_history, sorted_by_start};
use crate::models::{CycleRecord, CycleStat, CycleStatsResponse};

pub fn cycle_stats(records: &[CycleRecord]) -> CycleStatsResponse {
    let sorted = sorted_by_start(records);

    let mut total_period = 0;
    let mut total_cycle = 0;
    let mut defined_cycles = 0;
    let mut stats = Vec::with_capacity(sorted.len());

    for (i, record) in sorted.iter().enumerate() {
        let period = record.duration();
        // None for the ongoing cycle
        let cycle_len = sorted
            .get(i + 1)
            .map(|next| (next.start_date - record.start_date).num_days());

        total_period += period;
        if let Some(len) = cycle_len {
            total_cycle += len;
            defined_cycles += 1;
        }

        stats.push(CycleStat {
            cycle_number: (i + 1) as i32,
            start_date: record.start_date,
            period_length: period,
            cycle_length: cycle_len,
        });
    }

    let count = stats.len();

    CycleStatsResponse {
        average_period_length: if count > 0 { total_period as f64 / count as f64 } else { 0.0 },
        average_cycle_length: if defined_cycles > 0 { total_cycle as f64 / defined_cycles as f64 } else { 0.0 },
        cycle_stats: stats,
        history: duration_history(records),
    }
}
