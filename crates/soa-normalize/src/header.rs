//! Header normalization: one raw visit header string in, one [`Visit`] out.

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

use soa_model::Visit;
use soa_model::tables::VisitCategory;

use crate::patterns::detect_repeat_pattern;
use crate::window::parse_window;

static BASELINE_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bc1d1\b|cycle\s*1\s*day\s*1").expect("baseline marker regex")
});
static TIMEPOINT_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:cycle|day|week)\s*\d+").expect("timepoint regex"));

/// Normalize one header column into a [`Visit`] record.
///
/// `sequence_index` is the 0-based column position; `visit_id` is the
/// caller-assigned sequential id (starting at 1).
pub fn normalize_header(raw: &str, sequence_index: u32, visit_id: u32) -> Visit {
    let (visit_name, visit_code) = split_code(raw);
    let (window_lower, window_upper) = parse_window(raw);
    let repeat_pattern = detect_repeat_pattern(raw).map(|m| m.token);
    let category = classify_visit(raw, repeat_pattern.is_some());
    Visit {
        visit_id,
        raw_header: raw.to_string(),
        visit_name,
        visit_code,
        sequence_index,
        window_lower,
        window_upper,
        repeat_pattern,
        category,
    }
}

/// Extract the first balanced parenthetical group and remove it from the
/// header, producing `(visit_name, visit_code)`.
///
/// The removed span includes one immediately adjacent delimiting space. If
/// removal empties the header, the name falls back to the trimmed original.
fn split_code(raw: &str) -> (String, String) {
    let Some((code, span)) = first_parenthetical(raw) else {
        return (raw.trim().to_string(), String::new());
    };

    let mut start = span.start;
    let mut end = span.end;
    if start > 0 && raw.as_bytes()[start - 1] == b' ' {
        start -= 1;
    } else if end < raw.len() && raw.as_bytes()[end] == b' ' {
        end += 1;
    }

    let mut name = String::with_capacity(raw.len());
    name.push_str(&raw[..start]);
    name.push_str(&raw[end..]);
    let name = name.trim();
    if name.is_empty() {
        (raw.trim().to_string(), code)
    } else {
        (name.to_string(), code)
    }
}

/// Locate the first balanced `(...)` group, returning its inner text and the
/// byte range covering the parentheses.
fn first_parenthetical(raw: &str) -> Option<(String, Range<usize>)> {
    let open = raw.find('(')?;
    let mut depth = 0usize;
    for (offset, ch) in raw[open..].char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    let close = open + offset;
                    let inner = raw[open + 1..close].to_string();
                    return Some((inner, open..close + 1));
                }
            }
            _ => {}
        }
    }
    None
}

/// Visit-level heuristic classification.
///
/// An explicit ordered chain of keyword predicates; the first that fires
/// wins. Headers with no signal default to `treatment` when a repeat pattern
/// is present, otherwise `other`.
fn classify_visit(header: &str, has_repeat_pattern: bool) -> VisitCategory {
    let lower = header.to_lowercase();
    if lower.contains("screen") {
        return VisitCategory::Screening;
    }
    if lower.contains("end of treatment") || lower.contains("eot") {
        return VisitCategory::Eot;
    }
    if lower.contains("baseline") || BASELINE_MARKER_RE.is_match(header) {
        return VisitCategory::Baseline;
    }
    if lower.contains("follow") || lower.contains("survival") || has_word(&lower, "fu") {
        return VisitCategory::FollowUp;
    }
    if TIMEPOINT_TOKEN_RE.is_match(header) {
        return VisitCategory::Treatment;
    }
    if has_repeat_pattern {
        VisitCategory::Treatment
    } else {
        VisitCategory::Other
    }
}

fn has_word(lower: &str, word: &str) -> bool {
    lower
        .split(|c: char| !c.is_ascii_alphanumeric())
        .any(|token| token == word)
}
