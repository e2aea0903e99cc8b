//! Interval validation for projected schedules.
//!
//! Given dated occurrences of a target activity class (raw visit positions
//! or expanded instances), checks that consecutive gaps respect an expected
//! interval within a tolerance. Deviations are data, never errors.

pub mod events;
pub mod intervals;

pub use events::{CategoryEvent, derive_nominal_day, extract_category_events};
pub use intervals::{IntervalReport, Occurrence, check_intervals};
