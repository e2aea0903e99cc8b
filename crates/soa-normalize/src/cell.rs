//! Cell normalization: raw cell text into status flags plus an optional
//! repeat-pattern fragment for the rule extractor.

use crate::patterns::{PatternMatch, detect_repeat_pattern};

/// The normalized content of one non-empty matrix cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedCell {
    /// Trimmed cell text, kept verbatim as the status.
    pub status: String,
    /// True iff the first non-space token begins with an uppercase `X`.
    pub required_flag: bool,
    /// True iff the text contains "optional" or "if indicated"
    /// (case-insensitive). Independent of `required_flag`.
    pub conditional_flag: bool,
    /// Repeat pattern embedded in the cell, surfaced to the rule extractor
    /// rather than stored on the junction record.
    pub pattern: Option<PatternMatch>,
}

/// Normalize one cell. Empty or whitespace-only text produces no record.
pub fn normalize_cell(raw: &str) -> Option<NormalizedCell> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let lower = trimmed.to_lowercase();
    Some(NormalizedCell {
        status: trimmed.to_string(),
        required_flag: trimmed.starts_with('X'),
        conditional_flag: lower.contains("optional") || lower.contains("if indicated"),
        pattern: detect_repeat_pattern(trimmed),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_x_is_required() {
        let cell = normalize_cell("X").expect("cell");
        assert!(cell.required_flag);
        assert!(!cell.conditional_flag);
        assert!(cell.pattern.is_none());
    }

    #[test]
    fn optional_is_conditional_not_required() {
        let cell = normalize_cell("Optional").expect("cell");
        assert!(!cell.required_flag);
        assert!(cell.conditional_flag);
    }

    #[test]
    fn flags_can_coexist() {
        let cell = normalize_cell("X - Optional").expect("cell");
        assert!(cell.required_flag);
        assert!(cell.conditional_flag);
    }

    #[test]
    fn lowercase_x_is_not_required() {
        let cell = normalize_cell("x").expect("cell");
        assert!(!cell.required_flag);
    }

    #[test]
    fn if_indicated_any_case() {
        let cell = normalize_cell("If Indicated").expect("cell");
        assert!(cell.conditional_flag);
    }

    #[test]
    fn empty_cell_yields_no_record() {
        assert!(normalize_cell("").is_none());
        assert!(normalize_cell("   ").is_none());
    }

    #[test]
    fn pattern_fragment_is_surfaced() {
        let cell = normalize_cell("X (every 2 cycles)").expect("cell");
        assert!(cell.required_flag);
        let pattern = cell.pattern.expect("pattern");
        assert_eq!(pattern.token, "every_2_cycles");
        assert_eq!(pattern.raw, "every 2 cycles");
    }
}
