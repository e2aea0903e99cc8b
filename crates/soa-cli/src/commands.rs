//! Subcommand implementations.

use std::fs;

use anyhow::{Context, Result};
use chrono::Days;
use tracing::{info, warn};

use soa_model::ActivityClass;
use soa_normalize::normalize;
use soa_schedule::{ExpansionConfig, expand_rules};
use soa_validate::{IntervalReport, Occurrence, check_intervals, extract_category_events};

use soa_cli::io;

use crate::cli::{ExpandArgs, NormalizeArgs, ValidateArgs};
use crate::summary::{print_deviations, print_instances, print_normalize_summary};

pub fn run_normalize(args: &NormalizeArgs) -> Result<()> {
    let matrix = io::read_matrix(&args.input)?;
    let study = normalize(&matrix);
    io::write_tables(&args.out_dir, &study)?;
    info!(
        visits = study.visits.len(),
        activities = study.activities.len(),
        mappings = study.visit_activities.len(),
        rules = study.schedule_rules.len(),
        out_dir = %args.out_dir.display(),
        "normalization complete"
    );
    print_normalize_summary(&study);
    Ok(())
}

pub fn run_expand(args: &ExpandArgs) -> Result<()> {
    let rules = io::load_rules(&args.normalized_dir)?;
    let config = expansion_config(args);
    let outcome = expand_rules(&rules, &config).context("expand schedule rules")?;

    for skipped in &outcome.skipped {
        warn!(
            rule_id = skipped.rule_id,
            pattern = %skipped.pattern,
            reason = %skipped.reason,
            "rule produced no instances"
        );
    }
    info!(
        rules = rules.len(),
        instances = outcome.instances.len(),
        skipped = outcome.skipped.len(),
        "expansion complete"
    );

    if let Some(path) = &args.json_out {
        let json = serde_json::to_string_pretty(&outcome.instances)
            .context("serialize schedule instances")?;
        fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
        println!(
            "Wrote {} instances to {}",
            outcome.instances.len(),
            path.display()
        );
    } else {
        print_instances(&outcome.instances);
    }
    Ok(())
}

pub fn run_validate(args: &ValidateArgs) -> Result<IntervalReport> {
    let visits = io::load_visits(&args.normalized_dir)?;
    let visit_activities = io::load_visit_activities(&args.normalized_dir)?;
    let categories = io::load_activity_categories(&args.normalized_dir)?;

    let events = extract_category_events(
        &visits,
        &visit_activities,
        &categories,
        ActivityClass::Imaging,
        args.cycle_length_days,
        args.cycle_lengths.as_deref(),
    );
    let occurrences: Vec<Occurrence> = events
        .iter()
        .map(|event| Occurrence {
            ref_id: event.visit_id,
            date: args.start_date + Days::new(event.nominal_day.max(0) as u64),
        })
        .collect();

    let report = check_intervals(
        &occurrences,
        args.expected_interval_weeks,
        args.tolerance_days,
    );
    info!(
        events = events.len(),
        pairs = report.pairs_checked,
        deviations = report.deviations.len(),
        "validation complete"
    );
    print_deviations(&report.deviations);
    Ok(report)
}

fn expansion_config(args: &ExpandArgs) -> ExpansionConfig {
    ExpansionConfig {
        start_date: args.start_date,
        cycle_length_days: args.cycle_length_days,
        cycle_lengths: args.cycle_lengths.clone(),
        num_cycles: args.num_cycles,
        followup_weeks: args.followup_weeks,
        horizon_days: args.horizon_days,
        max_occurrences: args.max_occurrences,
        filter_patterns: if args.filter_pattern.is_empty() {
            None
        } else {
            Some(args.filter_pattern.clone())
        },
    }
}
