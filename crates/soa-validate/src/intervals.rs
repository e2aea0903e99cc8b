//! Consecutive-interval checking against an expected spacing.

use chrono::NaiveDate;
use tracing::debug;

use soa_model::Deviation;

const WEEK_DAYS: i64 = 7;

/// A dated occurrence of the target activity class. `ref_id` points at
/// whatever keyed the occurrence for the caller (rule id or visit id).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurrence {
    pub ref_id: u32,
    pub date: NaiveDate,
}

/// Outcome of one validation run.
///
/// Deviations present is a reportable condition, not an error; the caller
/// maps it to its own success/failure signal.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IntervalReport {
    pub deviations: Vec<Deviation>,
    pub pairs_checked: usize,
}

impl IntervalReport {
    pub fn has_deviations(&self) -> bool {
        !self.deviations.is_empty()
    }
}

/// Check every consecutive pair of occurrences (sorted by date) against
/// `expected_interval_weeks * 7 ± tolerance_days`.
///
/// Fewer than two occurrences yields an empty report. Pairs within
/// tolerance are not reported.
pub fn check_intervals(
    occurrences: &[Occurrence],
    expected_interval_weeks: u32,
    tolerance_days: u32,
) -> IntervalReport {
    let mut sorted: Vec<Occurrence> = occurrences.to_vec();
    sorted.sort_by_key(|occurrence| (occurrence.date, occurrence.ref_id));

    let expected_days = i64::from(expected_interval_weeks) * WEEK_DAYS;
    let tolerance = i64::from(tolerance_days);

    let mut report = IntervalReport::default();
    for pair in sorted.windows(2) {
        report.pairs_checked += 1;
        let actual_days = (pair[1].date - pair[0].date).num_days();
        let delta_days = actual_days - expected_days;
        if delta_days.abs() <= tolerance {
            continue;
        }
        report.deviations.push(Deviation {
            first_ref_id: pair[0].ref_id,
            second_ref_id: pair[1].ref_id,
            expected_interval_days: expected_days,
            actual_interval_days: actual_days,
            delta_days,
            within_tolerance: false,
        });
    }
    debug!(
        pairs = report.pairs_checked,
        deviations = report.deviations.len(),
        "interval check complete"
    );
    report
}
