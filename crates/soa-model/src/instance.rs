use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One projected occurrence of a schedule rule.
///
/// Instances are ephemeral: they are recomputed per expansion request and
/// never mutated in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleInstance {
    pub rule_id: u32,
    /// 0-based position within the rule's occurrence sequence.
    pub occurrence_index: u32,
    pub date: NaiveDate,
}
