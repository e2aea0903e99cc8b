//! Repeat-pattern detection.
//!
//! Recognizes the textual recurrence tokens that appear in visit headers and
//! matrix cells (`q12w`, `Every 2 cycles`, `every 12 weeks`) and normalizes
//! them to lower-case canonical tokens. Matching is case-insensitive; when a
//! string contains more than one distinct pattern the first by position wins.

use regex::Regex;
use std::sync::LazyLock;

static QW_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bq(\d{1,2})w\b").expect("qNw regex"));
static EVERY_CYCLES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bevery\s+(\d+)\s+cycles?\b").expect("every-cycles regex"));
static EVERY_WEEKS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bevery\s+(\d+)\s+weeks?\b").expect("every-weeks regex"));

/// A repeat pattern found in a piece of source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatch {
    /// Byte offset of the match within the scanned string.
    pub start: usize,
    /// The exact substring that matched.
    pub raw: String,
    /// Canonical token: `q{n}w`, `every_{n}_cycles` or `every_{n}_weeks`.
    pub token: String,
}

/// Scan `text` for a repeat pattern and return the first match by position.
///
/// Zero intervals (`q0w`, `every 0 cycles`) are not treated as patterns and
/// do not mask a valid pattern later in the string.
pub fn detect_repeat_pattern(text: &str) -> Option<PatternMatch> {
    let mut candidates: Vec<PatternMatch> = Vec::new();

    for caps in QW_RE.captures_iter(text) {
        let whole = caps.get(0).expect("whole match");
        if let Ok(n) = caps[1].parse::<u32>()
            && n > 0
        {
            candidates.push(PatternMatch {
                start: whole.start(),
                raw: whole.as_str().to_string(),
                token: format!("q{n}w"),
            });
        }
    }
    for caps in EVERY_CYCLES_RE.captures_iter(text) {
        let whole = caps.get(0).expect("whole match");
        if let Ok(n) = caps[1].parse::<u32>()
            && n > 0
        {
            candidates.push(PatternMatch {
                start: whole.start(),
                raw: whole.as_str().to_string(),
                token: format!("every_{n}_cycles"),
            });
        }
    }
    for caps in EVERY_WEEKS_RE.captures_iter(text) {
        let whole = caps.get(0).expect("whole match");
        if let Ok(n) = caps[1].parse::<u32>()
            && n > 0
        {
            candidates.push(PatternMatch {
                start: whole.start(),
                raw: whole.as_str().to_string(),
                token: format!("every_{n}_weeks"),
            });
        }
    }

    // Stable ordering: earliest match in the string wins.
    candidates.into_iter().min_by_key(|m| m.start)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_qnw() {
        let m = detect_repeat_pattern("Survival FU (q12w)").expect("pattern");
        assert_eq!(m.token, "q12w");
        assert_eq!(m.raw, "q12w");
    }

    #[test]
    fn detects_every_cycles_case_insensitive() {
        let m = detect_repeat_pattern("Every 2 Cycles").expect("pattern");
        assert_eq!(m.token, "every_2_cycles");
        assert_eq!(m.raw, "Every 2 Cycles");
    }

    #[test]
    fn detects_every_weeks() {
        let m = detect_repeat_pattern("imaging every 12 weeks thereafter").expect("pattern");
        assert_eq!(m.token, "every_12_weeks");
    }

    #[test]
    fn first_by_position_wins() {
        let m = detect_repeat_pattern("every 2 cycles then q12w").expect("pattern");
        assert_eq!(m.token, "every_2_cycles");
    }

    #[test]
    fn zero_interval_is_not_a_pattern() {
        assert!(detect_repeat_pattern("q0w").is_none());
        assert!(detect_repeat_pattern("every 0 cycles").is_none());
    }

    #[test]
    fn zero_interval_does_not_mask_a_later_match() {
        let m = detect_repeat_pattern("q0w then q12w").expect("pattern");
        assert_eq!(m.token, "q12w");
        let m = detect_repeat_pattern("every 0 cycles, every 3 cycles").expect("pattern");
        assert_eq!(m.token, "every_3_cycles");
    }

    #[test]
    fn plain_text_yields_none() {
        assert!(detect_repeat_pattern("Screening (-28 to -1d)").is_none());
        assert!(detect_repeat_pattern("").is_none());
    }
}
