//! Deterministic expansion of repeating schedule rules into calendar
//! occurrences under a cycle-length/horizon model.
//!
//! Expansion is idempotent: re-running with the same rules and configuration
//! produces bit-identical output, which downstream diffing relies on.

pub mod config;
pub mod error;
pub mod expand;
pub mod pattern;

pub use config::ExpansionConfig;
pub use error::{ConfigError, Result};
pub use expand::{ExpansionOutcome, SkipReason, SkippedRule, expand_rules};
pub use pattern::{PatternKind, parse_pattern};
