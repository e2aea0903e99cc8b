//! Pattern-token parsing for the expander.
//!
//! Tokens normally arrive in canonical form from normalization (`q12w`,
//! `every_2_cycles`), but rule tables can also be authored externally, so
//! the parser tolerates spaces and mixed case and degrades unknown tokens
//! to `None` for the caller to report.

use regex::Regex;
use std::sync::LazyLock;

const WEEK_DAYS: u32 = 7;

static QW_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^q(\d+)w$").expect("qNw regex"));
static QD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^q(\d+)d$").expect("qNd regex"));
static EVERY_WEEKS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^every_(\d+)_weeks?$").expect("every-weeks regex"));
static EVERY_CYCLES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^every_(\d+)_cycles?$").expect("every-cycles regex"));

/// The two generator families the expander knows about.
///
/// Day-interval patterns are capped by the horizon; cycle-stride patterns by
/// the configured cycle count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    DayInterval { days: u32 },
    CycleStride { cycles: u32 },
}

/// Parse a pattern token into its generator family.
///
/// Returns `None` for unrecognized or zero-interval tokens.
pub fn parse_pattern(token: &str) -> Option<PatternKind> {
    let canonical = token.trim().to_lowercase().replace(' ', "_");
    let kind = if let Some(caps) = QW_RE.captures(&canonical) {
        PatternKind::DayInterval {
            days: caps[1].parse::<u32>().ok()? * WEEK_DAYS,
        }
    } else if let Some(caps) = EVERY_WEEKS_RE.captures(&canonical) {
        PatternKind::DayInterval {
            days: caps[1].parse::<u32>().ok()? * WEEK_DAYS,
        }
    } else if let Some(caps) = QD_RE.captures(&canonical) {
        PatternKind::DayInterval {
            days: caps[1].parse::<u32>().ok()?,
        }
    } else if let Some(caps) = EVERY_CYCLES_RE.captures(&canonical) {
        PatternKind::CycleStride {
            cycles: caps[1].parse::<u32>().ok()?,
        }
    } else {
        return None;
    };

    match kind {
        PatternKind::DayInterval { days: 0 } | PatternKind::CycleStride { cycles: 0 } => None,
        other => Some(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_tokens() {
        assert_eq!(
            parse_pattern("q12w"),
            Some(PatternKind::DayInterval { days: 84 })
        );
        assert_eq!(
            parse_pattern("every_12_weeks"),
            Some(PatternKind::DayInterval { days: 84 })
        );
        assert_eq!(
            parse_pattern("every_2_cycles"),
            Some(PatternKind::CycleStride { cycles: 2 })
        );
        assert_eq!(
            parse_pattern("q10d"),
            Some(PatternKind::DayInterval { days: 10 })
        );
    }

    #[test]
    fn spaced_and_mixed_case_tokens() {
        assert_eq!(
            parse_pattern("Every 2 cycles"),
            Some(PatternKind::CycleStride { cycles: 2 })
        );
        assert_eq!(
            parse_pattern("Q3W"),
            Some(PatternKind::DayInterval { days: 21 })
        );
    }

    #[test]
    fn malformed_tokens_are_none() {
        assert_eq!(parse_pattern("qXYZw"), None);
        assert_eq!(parse_pattern("weekly"), None);
        assert_eq!(parse_pattern(""), None);
    }

    #[test]
    fn zero_intervals_are_none() {
        assert_eq!(parse_pattern("q0w"), None);
        assert_eq!(parse_pattern("every_0_cycles"), None);
    }
}
