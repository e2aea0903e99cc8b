//! Relational data model for normalized Schedule of Activities matrices.
//!
//! All records are immutable value types keyed by surrogate integer ids
//! assigned at creation time. A normalization run produces fresh tables;
//! nothing here is mutated after creation.

pub mod deviation;
pub mod instance;
pub mod tables;

pub use deviation::Deviation;
pub use instance::ScheduleInstance;
pub use tables::{
    Activity, ActivityCategory, ActivityClass, ScheduleRule, SourceType, Visit, VisitActivity,
    VisitCategory,
};
