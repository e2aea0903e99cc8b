use thiserror::Error;

/// Configuration errors that make a calendar unsafe to expand.
///
/// These are raised before any instance is generated.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("num_cycles must be positive (got {0})")]
    InvalidCycleCount(u32),
    #[error("cycle_length_days must be positive")]
    InvalidCycleLength,
    #[error("cycle_lengths must not be empty when supplied")]
    EmptyCycleLengths,
    #[error("cycle_lengths[{index}] must be positive")]
    NonPositiveCycleLength { index: usize },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
