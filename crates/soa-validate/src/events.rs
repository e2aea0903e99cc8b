//! Imaging-event extraction from normalized tables.
//!
//! Selects the visits that carry an activity of the target category and
//! derives a nominal study day for each from the visit label, so the
//! interval checker can work from raw visit data when no expansion has
//! been run.

use std::collections::BTreeSet;

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use soa_model::{ActivityCategory, ActivityClass, Visit, VisitActivity};

const WEEK_DAYS: i64 = 7;

static CYCLE_DAY1_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)cycle\s*(\d+)\s*day\s*1").expect("cycle-day1 regex"));
static WEEK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)week\s*(\d+)").expect("week regex"));
static DAY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)day\s*(\d+)").expect("day regex"));

/// One visit at which the target activity class occurs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryEvent {
    pub visit_id: u32,
    pub visit_name: String,
    /// Nominal study day derived from the visit label (day 1 = start).
    pub nominal_day: i64,
}

/// Derive a nominal study day from a visit label.
///
/// Priority: `Cycle N Day 1` (cycle-boundary arithmetic), `Week N`,
/// `Day N`, then a screening marker anchored at day 0. Labels with no
/// temporal signal return `None` and are excluded from interval checks.
pub fn derive_nominal_day(
    label: &str,
    cycle_length_days: u32,
    cycle_lengths: Option<&[u32]>,
) -> Option<i64> {
    if let Some(caps) = CYCLE_DAY1_RE.captures(label)
        && let Ok(cycle) = caps[1].parse::<u32>()
        && cycle >= 1
    {
        return Some(cycle_start_day(cycle, cycle_length_days, cycle_lengths));
    }
    if let Some(caps) = WEEK_RE.captures(label)
        && let Ok(week) = caps[1].parse::<i64>()
    {
        return Some(week * WEEK_DAYS);
    }
    if let Some(caps) = DAY_RE.captures(label)
        && let Ok(day) = caps[1].parse::<i64>()
    {
        return Some(day);
    }
    if label.to_lowercase().contains("screen") {
        return Some(0);
    }
    None
}

/// Nominal start day of a 1-indexed cycle (cycle 1 starts on day 1).
fn cycle_start_day(cycle: u32, cycle_length_days: u32, cycle_lengths: Option<&[u32]>) -> i64 {
    let mut day = 1i64;
    for index in 0..cycle.saturating_sub(1) {
        let length = match cycle_lengths {
            Some(lengths) => lengths
                .get(index as usize)
                .or_else(|| lengths.last())
                .copied()
                .unwrap_or(cycle_length_days),
            None => cycle_length_days,
        };
        day += i64::from(length);
    }
    day
}

/// Extract one event per visit that carries an activity of `target` class.
///
/// Visits whose label yields no nominal day are dropped; the result is
/// sorted by nominal day, then visit id.
pub fn extract_category_events(
    visits: &[Visit],
    visit_activities: &[VisitActivity],
    categories: &[ActivityCategory],
    target: ActivityClass,
    cycle_length_days: u32,
    cycle_lengths: Option<&[u32]>,
) -> Vec<CategoryEvent> {
    let target_ids: BTreeSet<u32> = categories
        .iter()
        .filter(|c| c.category == target)
        .map(|c| c.activity_id)
        .collect();

    let mut visit_ids: BTreeSet<u32> = BTreeSet::new();
    for va in visit_activities {
        if target_ids.contains(&va.activity_id) {
            visit_ids.insert(va.visit_id);
        }
    }

    let mut events: Vec<CategoryEvent> = visits
        .iter()
        .filter(|visit| visit_ids.contains(&visit.visit_id))
        .filter_map(|visit| {
            let nominal_day =
                derive_nominal_day(&visit.visit_name, cycle_length_days, cycle_lengths)
                    .or_else(|| {
                        derive_nominal_day(&visit.raw_header, cycle_length_days, cycle_lengths)
                    })?;
            Some(CategoryEvent {
                visit_id: visit.visit_id,
                visit_name: visit.visit_name.clone(),
                nominal_day,
            })
        })
        .collect();
    events.sort_by(|a, b| {
        (a.nominal_day, a.visit_id).cmp(&(b.nominal_day, b.visit_id))
    });
    debug!(events = events.len(), target = %target, "category events extracted");
    events
}
