//! Schedule expansion: rules plus a temporal configuration in, bounded
//! date-ordered occurrence sequences out.
//!
//! Two generator strategies, selected by pattern family: day-interval
//! patterns march from the start date and stop at the horizon; cycle-stride
//! patterns walk the precomputed cycle boundaries and stop at the configured
//! cycle count. Identical inputs always produce identical output.

use std::collections::BTreeSet;
use std::fmt;

use chrono::Days;
use tracing::{debug, warn};

use soa_model::{ScheduleInstance, ScheduleRule};

use crate::config::ExpansionConfig;
use crate::error::Result;
use crate::pattern::{PatternKind, parse_pattern};

/// Why a rule produced no instances. Reportable, never fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    UnrecognizedPattern,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnrecognizedPattern => f.write_str("unrecognized or zero-interval pattern"),
        }
    }
}

/// A rule that was skipped during expansion, with its reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRule {
    pub rule_id: u32,
    pub pattern: String,
    pub reason: SkipReason,
}

/// The result of one expansion run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExpansionOutcome {
    /// Instances ordered by rule input order, then occurrence index.
    pub instances: Vec<ScheduleInstance>,
    /// Rules that yielded zero instances because their pattern could not be
    /// interpreted. Rules removed by the pattern filter are not listed.
    pub skipped: Vec<SkippedRule>,
}

/// Expand every surviving rule into its dated occurrence sequence.
///
/// Fails fast with a [`crate::ConfigError`] when the configuration cannot
/// describe a full calendar; otherwise unparseable patterns degrade to
/// reported skips.
pub fn expand_rules(rules: &[ScheduleRule], config: &ExpansionConfig) -> Result<ExpansionOutcome> {
    config.validate()?;

    let horizon_end = config.start_date + Days::new(u64::from(config.effective_horizon_days()));
    let boundaries = config.cycle_boundaries();
    let filter: Option<BTreeSet<String>> = config
        .filter_patterns
        .as_ref()
        .map(|patterns| patterns.iter().map(|p| p.to_lowercase()).collect());

    let mut outcome = ExpansionOutcome::default();
    for rule in rules {
        if let Some(allowed) = &filter
            && !allowed.contains(&rule.pattern.to_lowercase())
        {
            continue;
        }
        let Some(kind) = parse_pattern(&rule.pattern) else {
            warn!(
                rule_id = rule.rule_id,
                pattern = %rule.pattern,
                "skipping rule with unrecognized pattern"
            );
            outcome.skipped.push(SkippedRule {
                rule_id: rule.rule_id,
                pattern: rule.pattern.clone(),
                reason: SkipReason::UnrecognizedPattern,
            });
            continue;
        };

        let before = outcome.instances.len();
        match kind {
            PatternKind::DayInterval { days } => {
                let mut occurrence_index = 0u32;
                while !capped(config, occurrence_index) {
                    let date = config.start_date
                        + Days::new(u64::from(occurrence_index) * u64::from(days));
                    if date > horizon_end {
                        break;
                    }
                    outcome.instances.push(ScheduleInstance {
                        rule_id: rule.rule_id,
                        occurrence_index,
                        date,
                    });
                    occurrence_index += 1;
                }
            }
            PatternKind::CycleStride { cycles } => {
                let mut occurrence_index = 0u32;
                let mut cycle_index = 0u32;
                while cycle_index < config.num_cycles && !capped(config, occurrence_index) {
                    outcome.instances.push(ScheduleInstance {
                        rule_id: rule.rule_id,
                        occurrence_index,
                        date: boundaries[cycle_index as usize],
                    });
                    occurrence_index += 1;
                    cycle_index += cycles;
                }
            }
        }
        debug!(
            rule_id = rule.rule_id,
            pattern = %rule.pattern,
            occurrences = outcome.instances.len() - before,
            "rule expanded"
        );
    }
    Ok(outcome)
}

/// True once `generated` instances have exhausted the configured cap. A cap
/// of zero means no rule emits anything.
fn capped(config: &ExpansionConfig, generated: u32) -> bool {
    config.max_occurrences.is_some_and(|cap| generated >= cap)
}
