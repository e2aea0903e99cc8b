use serde::{Deserialize, Serialize};

/// An out-of-tolerance gap between two consecutive dated occurrences.
///
/// `delta_days` is signed: `actual_interval_days - expected_interval_days`.
/// The reference ids point at whatever keyed the occurrences (rule ids or
/// visit ids, depending on the caller).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deviation {
    pub first_ref_id: u32,
    pub second_ref_id: u32,
    pub expected_interval_days: i64,
    pub actual_interval_days: i64,
    pub delta_days: i64,
    pub within_tolerance: bool,
}
