//! Rule extraction: harvest repeat-pattern tokens with their provenance.
//!
//! Emits header-sourced rules for visits whose header carried a pattern, and
//! cell-sourced rules for activities whose cells carried one. No date math
//! happens here.

use std::collections::BTreeSet;

use tracing::debug;

use soa_model::{Activity, ScheduleRule, SourceType, Visit};

use crate::patterns::PatternMatch;

/// A pattern fragment found in a cell during matrix normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellFragment {
    pub activity_id: u32,
    pub visit_id: u32,
    pub pattern: PatternMatch,
}

/// Build the deduplicated schedule-rule table.
///
/// Ordering is deterministic: header rules in visit order, then cell rules
/// in row-major cell order. Identical (pattern, source, owner, raw_text)
/// tuples collapse to the first occurrence.
pub fn extract_rules(
    visits: &[Visit],
    activities: &[Activity],
    fragments: &[CellFragment],
) -> Vec<ScheduleRule> {
    let mut rules = Vec::new();
    let mut seen: BTreeSet<(String, SourceType, Option<u32>, Option<u32>, String)> =
        BTreeSet::new();
    let mut next_id = 1u32;

    for visit in visits {
        let Some(pattern) = &visit.repeat_pattern else {
            continue;
        };
        // The header normalizer records only the canonical token; recover the
        // matched substring for provenance.
        let raw_text = crate::patterns::detect_repeat_pattern(&visit.raw_header)
            .map(|m| m.raw)
            .unwrap_or_else(|| pattern.clone());
        let key = (
            pattern.clone(),
            SourceType::Header,
            None,
            Some(visit.visit_id),
            raw_text.clone(),
        );
        if !seen.insert(key) {
            continue;
        }
        rules.push(ScheduleRule {
            rule_id: next_id,
            pattern: pattern.clone(),
            description: format!("detected in header of visit {}", visit.visit_name),
            source_type: SourceType::Header,
            activity_id: None,
            visit_id: Some(visit.visit_id),
            raw_text,
        });
        next_id += 1;
    }

    for fragment in fragments {
        let key = (
            fragment.pattern.token.clone(),
            SourceType::Cell,
            Some(fragment.activity_id),
            None,
            fragment.pattern.raw.clone(),
        );
        if !seen.insert(key) {
            continue;
        }
        let activity_name = activities
            .iter()
            .find(|a| a.activity_id == fragment.activity_id)
            .map(|a| a.activity_name.as_str())
            .unwrap_or("unknown activity");
        rules.push(ScheduleRule {
            rule_id: next_id,
            pattern: fragment.pattern.token.clone(),
            description: format!("detected in cell for activity {activity_name}"),
            source_type: SourceType::Cell,
            activity_id: Some(fragment.activity_id),
            visit_id: None,
            raw_text: fragment.pattern.raw.clone(),
        });
        next_id += 1;
    }

    debug!(
        rule_count = rules.len(),
        header_rules = rules
            .iter()
            .filter(|r| r.source_type == SourceType::Header)
            .count(),
        "schedule rules extracted"
    );
    rules
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::normalize_header;

    fn activity(id: u32, name: &str) -> Activity {
        Activity {
            activity_id: id,
            activity_name: name.to_string(),
        }
    }

    #[test]
    fn header_rule_keeps_visit_provenance() {
        let visits = vec![normalize_header("Survival FU (q12w)", 7, 8)];
        let rules = extract_rules(&visits, &[], &[]);
        assert_eq!(rules.len(), 1);
        let rule = &rules[0];
        assert_eq!(rule.pattern, "q12w");
        assert_eq!(rule.source_type, SourceType::Header);
        assert_eq!(rule.visit_id, Some(8));
        assert_eq!(rule.activity_id, None);
        assert_eq!(rule.raw_text, "q12w");
        assert_eq!(rule.description, "detected in header of visit Survival FU");
    }

    #[test]
    fn same_pattern_on_two_visits_yields_two_rules() {
        let visits = vec![
            normalize_header("Imaging A (q12w)", 3, 4),
            normalize_header("Imaging B (q12w)", 4, 5),
        ];
        let rules = extract_rules(&visits, &[], &[]);
        assert_eq!(rules.len(), 2);
        assert_ne!(rules[0].visit_id, rules[1].visit_id);
    }

    #[test]
    fn cell_fragments_dedupe_across_visits() {
        let activities = vec![activity(2, "Imaging (CT/MRI)")];
        let pattern = PatternMatch {
            start: 0,
            raw: "every 2 cycles".to_string(),
            token: "every_2_cycles".to_string(),
        };
        let fragments = vec![
            CellFragment {
                activity_id: 2,
                visit_id: 3,
                pattern: pattern.clone(),
            },
            CellFragment {
                activity_id: 2,
                visit_id: 5,
                pattern,
            },
        ];
        let rules = extract_rules(&[], &activities, &fragments);
        assert_eq!(rules.len(), 1);
        let rule = &rules[0];
        assert_eq!(rule.source_type, SourceType::Cell);
        assert_eq!(rule.activity_id, Some(2));
        assert_eq!(rule.visit_id, None);
        assert_eq!(
            rule.description,
            "detected in cell for activity Imaging (CT/MRI)"
        );
    }

    #[test]
    fn rule_ids_are_sequential_from_one() {
        let visits = vec![normalize_header("Survival FU (q12w)", 0, 1)];
        let activities = vec![activity(1, "Imaging")];
        let fragments = vec![CellFragment {
            activity_id: 1,
            visit_id: 1,
            pattern: PatternMatch {
                start: 0,
                raw: "q3w".to_string(),
                token: "q3w".to_string(),
            },
        }];
        let rules = extract_rules(&visits, &activities, &fragments);
        assert_eq!(
            rules.iter().map(|r| r.rule_id).collect::<Vec<_>>(),
            vec![1, 2]
        );
    }
}
