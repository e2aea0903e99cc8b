//! Temporal configuration for one expansion run.

use chrono::{Days, NaiveDate};

use crate::error::{ConfigError, Result};

const WEEK_DAYS: u32 = 7;

/// Run configuration for the schedule expander.
///
/// `cycle_lengths`, when supplied, gives heterogeneous per-cycle lengths;
/// cycles beyond the list repeat its last entry. Otherwise every cycle is
/// `cycle_length_days` long.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpansionConfig {
    pub start_date: NaiveDate,
    pub cycle_length_days: u32,
    pub cycle_lengths: Option<Vec<u32>>,
    pub num_cycles: u32,
    pub followup_weeks: u32,
    /// Overrides the computed horizon outright when set.
    pub horizon_days: Option<u32>,
    /// Truncates every rule's sequence to its first N instances.
    pub max_occurrences: Option<u32>,
    /// Restricts expansion to rules with one of these pattern tokens.
    pub filter_patterns: Option<Vec<String>>,
}

impl ExpansionConfig {
    /// Defaults mirror a common oncology design: 21-day cycles, 8 cycles,
    /// 104 weeks of follow-up.
    pub fn new(start_date: NaiveDate) -> Self {
        Self {
            start_date,
            cycle_length_days: 21,
            cycle_lengths: None,
            num_cycles: 8,
            followup_weeks: 104,
            horizon_days: None,
            max_occurrences: None,
            filter_patterns: None,
        }
    }

    #[must_use]
    pub fn with_cycle_lengths(mut self, lengths: Vec<u32>) -> Self {
        self.cycle_lengths = Some(lengths);
        self
    }

    #[must_use]
    pub fn with_horizon_days(mut self, days: u32) -> Self {
        self.horizon_days = Some(days);
        self
    }

    #[must_use]
    pub fn with_max_occurrences(mut self, cap: u32) -> Self {
        self.max_occurrences = Some(cap);
        self
    }

    #[must_use]
    pub fn with_filter_patterns(mut self, patterns: Vec<String>) -> Self {
        self.filter_patterns = Some(patterns);
        self
    }

    /// Fail fast on configurations that cannot describe a full calendar.
    pub fn validate(&self) -> Result<()> {
        if self.num_cycles == 0 {
            return Err(ConfigError::InvalidCycleCount(self.num_cycles));
        }
        match &self.cycle_lengths {
            Some(lengths) if lengths.is_empty() => Err(ConfigError::EmptyCycleLengths),
            Some(lengths) => {
                if let Some(index) = lengths.iter().position(|len| *len == 0) {
                    return Err(ConfigError::NonPositiveCycleLength { index });
                }
                Ok(())
            }
            None if self.cycle_length_days == 0 => Err(ConfigError::InvalidCycleLength),
            None => Ok(()),
        }
    }

    /// Effective length of the 0-indexed cycle.
    pub fn cycle_length(&self, cycle_index: u32) -> u32 {
        match &self.cycle_lengths {
            Some(lengths) => lengths
                .get(cycle_index as usize)
                .or_else(|| lengths.last())
                .copied()
                .unwrap_or(self.cycle_length_days),
            None => self.cycle_length_days,
        }
    }

    /// Start dates of cycles `0..num_cycles`, cumulative from `start_date`.
    pub fn cycle_boundaries(&self) -> Vec<NaiveDate> {
        let mut boundaries = Vec::with_capacity(self.num_cycles as usize);
        let mut date = self.start_date;
        for cycle in 0..self.num_cycles {
            boundaries.push(date);
            date = date + Days::new(u64::from(self.cycle_length(cycle)));
        }
        boundaries
    }

    /// Horizon in days: the explicit override, or the treatment span plus
    /// the follow-up span.
    pub fn effective_horizon_days(&self) -> u32 {
        if let Some(days) = self.horizon_days {
            return days;
        }
        let treatment: u32 = (0..self.num_cycles).map(|c| self.cycle_length(c)).sum();
        treatment + self.followup_weeks * WEEK_DAYS
    }
}
