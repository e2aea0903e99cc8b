//! Matrix-level normalization: the wide SoA matrix in, relational tables out.
//!
//! The caller supplies the matrix as ordered header strings plus ordered
//! (activity name, cells) rows, regardless of whether it came from a file or
//! interactive editing. Each run produces fresh tables; nothing is mutated
//! after creation.

use tracing::debug;

use soa_model::{Activity, ActivityCategory, ScheduleRule, Visit, VisitActivity};

use crate::category::classify_activity;
use crate::cell::normalize_cell;
use crate::header::normalize_header;
use crate::rules::{CellFragment, extract_rules};

/// One activity row of the wide matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixRow {
    /// First-column text, possibly empty.
    pub activity: String,
    /// Cell strings aligned with the visit headers.
    pub cells: Vec<String>,
}

/// The wide Schedule of Activities matrix.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SoaMatrix {
    /// Visit/timepoint headers in column order (the activity column excluded).
    pub headers: Vec<String>,
    pub rows: Vec<MatrixRow>,
}

/// The relational output of one normalization run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NormalizedStudy {
    pub visits: Vec<Visit>,
    pub activities: Vec<Activity>,
    pub visit_activities: Vec<VisitActivity>,
    pub activity_categories: Vec<ActivityCategory>,
    pub schedule_rules: Vec<ScheduleRule>,
}

/// Normalize a wide matrix into relational tables.
///
/// Pure transform: best-effort parsing leaves fields empty rather than
/// failing, and no input row is silently dropped.
pub fn normalize(matrix: &SoaMatrix) -> NormalizedStudy {
    let visits: Vec<Visit> = matrix
        .headers
        .iter()
        .enumerate()
        .map(|(index, header)| normalize_header(header, index as u32, index as u32 + 1))
        .collect();

    let activities: Vec<Activity> = matrix
        .rows
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let trimmed = row.activity.trim();
            let activity_name = if trimmed.is_empty() {
                // Malformed rows are tolerated, not dropped.
                format!("Activity_{}", index + 1)
            } else {
                trimmed.to_string()
            };
            Activity {
                activity_id: index as u32 + 1,
                activity_name,
            }
        })
        .collect();

    let mut visit_activities = Vec::new();
    let mut fragments: Vec<CellFragment> = Vec::new();
    let mut next_id = 1u32;
    for (row_index, row) in matrix.rows.iter().enumerate() {
        let activity_id = row_index as u32 + 1;
        for (col_index, raw_cell) in row.cells.iter().enumerate() {
            let Some(visit) = visits.get(col_index) else {
                continue;
            };
            let Some(cell) = normalize_cell(raw_cell) else {
                continue;
            };
            if let Some(pattern) = cell.pattern {
                fragments.push(CellFragment {
                    activity_id,
                    visit_id: visit.visit_id,
                    pattern,
                });
            }
            visit_activities.push(VisitActivity {
                id: next_id,
                visit_id: visit.visit_id,
                activity_id,
                status: cell.status,
                required_flag: cell.required_flag,
                conditional_flag: cell.conditional_flag,
            });
            next_id += 1;
        }
    }

    let activity_categories = activities
        .iter()
        .map(|activity| ActivityCategory {
            activity_id: activity.activity_id,
            category: classify_activity(&activity.activity_name),
        })
        .collect();

    let schedule_rules = extract_rules(&visits, &activities, &fragments);

    debug!(
        visits = visits.len(),
        activities = activities.len(),
        mappings = visit_activities.len(),
        rules = schedule_rules.len(),
        "matrix normalized"
    );

    NormalizedStudy {
        visits,
        activities,
        visit_activities,
        activity_categories,
        schedule_rules,
    }
}
