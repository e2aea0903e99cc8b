use serde::{Deserialize, Serialize};
use std::fmt;

/// Heuristic classification of a visit column, derived from its header text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisitCategory {
    Screening,
    Baseline,
    Treatment,
    FollowUp,
    Eot,
    Other,
}

impl fmt::Display for VisitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Screening => "screening",
            Self::Baseline => "baseline",
            Self::Treatment => "treatment",
            Self::FollowUp => "follow_up",
            Self::Eot => "eot",
            Self::Other => "other",
        };
        f.write_str(label)
    }
}

/// Closed set of activity category labels assigned by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityClass {
    Imaging,
    Labs,
    Dosing,
    Vitals,
    Pharmacokinetics,
    Pathology,
    PatientReported,
    PerformanceStatus,
    AdverseEvent,
    Admin,
    Other,
}

impl fmt::Display for ActivityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Imaging => "imaging",
            Self::Labs => "labs",
            Self::Dosing => "dosing",
            Self::Vitals => "vitals",
            Self::Pharmacokinetics => "pharmacokinetics",
            Self::Pathology => "pathology",
            Self::PatientReported => "patient_reported",
            Self::PerformanceStatus => "performance_status",
            Self::AdverseEvent => "adverse_event",
            Self::Admin => "admin",
            Self::Other => "other",
        };
        f.write_str(label)
    }
}

/// Where a schedule rule was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Header,
    Cell,
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Header => f.write_str("header"),
            Self::Cell => f.write_str("cell"),
        }
    }
}

/// One visit/timepoint column of the wide matrix.
///
/// `visit_id` is assigned sequentially in input order starting at 1;
/// `sequence_index` is the 0-based column position. Window bounds are signed
/// day offsets and stay `None` when the header carries no parseable window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visit {
    pub visit_id: u32,
    pub raw_header: String,
    pub visit_name: String,
    /// Text inside the first balanced parenthetical group, or empty.
    pub visit_code: String,
    pub sequence_index: u32,
    pub window_lower: Option<i32>,
    pub window_upper: Option<i32>,
    /// Normalized repeat-pattern token detected in the header, if any.
    pub repeat_pattern: Option<String>,
    pub category: VisitCategory,
}

/// One activity row of the wide matrix. Duplicate names are not merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub activity_id: u32,
    pub activity_name: String,
}

/// Junction record for a non-empty cell at (visit, activity).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitActivity {
    pub id: u32,
    pub visit_id: u32,
    pub activity_id: u32,
    /// Raw cell text, trimmed.
    pub status: String,
    pub required_flag: bool,
    pub conditional_flag: bool,
}

/// Authoritative category for one activity, derived once at normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityCategory {
    pub activity_id: u32,
    pub category: ActivityClass,
}

/// A harvested repeating-schedule rule with provenance.
///
/// Exactly one of `activity_id` (cell-sourced) and `visit_id`
/// (header-sourced) is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRule {
    pub rule_id: u32,
    /// Normalized token, e.g. `q12w` or `every_2_cycles`.
    pub pattern: String,
    pub description: String,
    pub source_type: SourceType,
    pub activity_id: Option<u32>,
    pub visit_id: Option<u32>,
    /// The substring of the source text that matched the pattern.
    pub raw_text: String,
}
