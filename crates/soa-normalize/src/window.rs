//! Visit-window parsing.
//!
//! Windows are signed day-offset ranges embedded in header text. Four forms
//! are recognized, tried in a fixed priority order; the first form that
//! matches wins and no attempt is made to reconcile conflicting matches:
//!
//! 1. `(-28 to -1d)` — explicit range
//! 2. `(±7d)` — symmetric window in parentheses
//! 3. `30±7d` — numeric anchor with symmetric tolerance
//! 4. `±7d` — bare symmetric window, no anchor known
//!
//! The `d` suffix is optional everywhere. Unparseable headers yield
//! `(None, None)`; parsing is best-effort and never fails.

use regex::Regex;
use std::sync::LazyLock;

static RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(\s*([-+]?\d+)\s*to\s*([-+]?\d+)\s*d?\s*\)").expect("range regex")
});
static PM_PAREN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\s*(?:±|\+/-)\s*(\d+)\s*d?\s*\)").expect("pm-paren regex"));
// The anchor must be adjacent to the tolerance sign; "4 ±3d" is a bare
// symmetric window following an unrelated number, not an anchored one.
static ANCHOR_PM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)(?:±|\+/-)\s*(\d+)\s*d?").expect("anchor-pm regex"));
static PM_BARE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:±|\+/-)\s*(\d+)\s*d?").expect("pm-bare regex"));

/// Parse the visit window from a header string.
pub fn parse_window(header: &str) -> (Option<i32>, Option<i32>) {
    if let Some(caps) = RANGE_RE.captures(header) {
        let lower = caps[1].parse::<i32>().ok();
        let upper = caps[2].parse::<i32>().ok();
        return (lower, upper);
    }
    if let Some(caps) = PM_PAREN_RE.captures(header)
        && let Ok(value) = caps[1].parse::<i32>()
    {
        return (Some(-value), Some(value));
    }
    if let Some(caps) = ANCHOR_PM_RE.captures(header)
        && let (Ok(anchor), Ok(pm)) = (caps[1].parse::<i32>(), caps[2].parse::<i32>())
    {
        return (Some(anchor - pm), Some(anchor + pm));
    }
    if let Some(caps) = PM_BARE_RE.captures(header)
        && let Ok(pm) = caps[1].parse::<i32>()
    {
        return (Some(-pm), Some(pm));
    }
    (None, None)
}
