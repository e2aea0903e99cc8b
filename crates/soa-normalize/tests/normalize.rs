//! Matrix-level normalization tests against a small oncology-style matrix.

use soa_model::{ActivityClass, SourceType};
use soa_model::tables::VisitCategory;
use soa_normalize::{MatrixRow, SoaMatrix, normalize};

fn row(activity: &str, cells: &[&str]) -> MatrixRow {
    MatrixRow {
        activity: activity.to_string(),
        cells: cells.iter().map(|c| (*c).to_string()).collect(),
    }
}

fn sample_matrix() -> SoaMatrix {
    SoaMatrix {
        headers: vec![
            "Screening (-28 to -1d)".to_string(),
            "Cycle 1 Day 1 (C1D1)".to_string(),
            "Cycle 2 Day 1 (C2D1)".to_string(),
            "EOT (±7d)".to_string(),
            "Survival FU (q12w)".to_string(),
        ],
        rows: vec![
            row("Informed Consent", &["X", "", "", "", ""]),
            row("Hematology (CBC)", &["X", "X", "X", "X", ""]),
            row(
                "Imaging (CT/MRI)",
                &["X", "", "X (every 2 cycles)", "X", ""],
            ),
            row("Vital Signs", &["X", "X", "X", "X", "Optional"]),
            row("", &["", "If indicated", "", "", ""]),
        ],
    }
}

#[test]
fn visits_are_sequential_in_column_order() {
    let study = normalize(&sample_matrix());
    assert_eq!(study.visits.len(), 5);
    for (index, visit) in study.visits.iter().enumerate() {
        assert_eq!(visit.visit_id, index as u32 + 1);
        assert_eq!(visit.sequence_index, index as u32);
    }
    assert_eq!(study.visits[0].category, VisitCategory::Screening);
    assert_eq!(study.visits[1].category, VisitCategory::Baseline);
    assert_eq!(study.visits[2].category, VisitCategory::Treatment);
    assert_eq!(study.visits[3].category, VisitCategory::Eot);
    assert_eq!(study.visits[4].category, VisitCategory::FollowUp);
}

#[test]
fn windows_parse_per_priority_order() {
    let study = normalize(&sample_matrix());
    assert_eq!(study.visits[0].window_lower, Some(-28));
    assert_eq!(study.visits[0].window_upper, Some(-1));
    assert_eq!(study.visits[3].window_lower, Some(-7));
    assert_eq!(study.visits[3].window_upper, Some(7));
    assert_eq!(study.visits[1].window_lower, None);
    assert_eq!(study.visits[1].window_upper, None);
}

#[test]
fn empty_activity_name_still_gets_a_record() {
    let study = normalize(&sample_matrix());
    assert_eq!(study.activities.len(), 5);
    assert_eq!(study.activities[4].activity_name, "Activity_5");
    // Its one non-empty cell still produced a junction record.
    assert!(
        study
            .visit_activities
            .iter()
            .any(|va| va.activity_id == 5 && va.conditional_flag && !va.required_flag)
    );
}

#[test]
fn junction_rows_only_for_non_empty_cells() {
    let study = normalize(&sample_matrix());
    // 1 + 4 + 3 + 5 + 1 non-empty cells.
    assert_eq!(study.visit_activities.len(), 14);
    let mut pairs: Vec<(u32, u32)> = study
        .visit_activities
        .iter()
        .map(|va| (va.visit_id, va.activity_id))
        .collect();
    pairs.sort_unstable();
    pairs.dedup();
    assert_eq!(pairs.len(), 14, "at most one row per (visit, activity)");
}

#[test]
fn categories_cover_every_activity() {
    let study = normalize(&sample_matrix());
    assert_eq!(study.activity_categories.len(), study.activities.len());
    let category_of = |id: u32| {
        study
            .activity_categories
            .iter()
            .find(|c| c.activity_id == id)
            .map(|c| c.category)
            .expect("category")
    };
    assert_eq!(category_of(1), ActivityClass::Admin);
    assert_eq!(category_of(2), ActivityClass::Labs);
    assert_eq!(category_of(3), ActivityClass::Imaging);
    assert_eq!(category_of(4), ActivityClass::Vitals);
    assert_eq!(category_of(5), ActivityClass::Other);
}

#[test]
fn rules_carry_provenance_from_both_sources() {
    let study = normalize(&sample_matrix());
    assert_eq!(study.schedule_rules.len(), 2);

    let header_rule = study
        .schedule_rules
        .iter()
        .find(|r| r.source_type == SourceType::Header)
        .expect("header rule");
    assert_eq!(header_rule.pattern, "q12w");
    assert_eq!(header_rule.visit_id, Some(5));
    assert_eq!(header_rule.activity_id, None);

    let cell_rule = study
        .schedule_rules
        .iter()
        .find(|r| r.source_type == SourceType::Cell)
        .expect("cell rule");
    assert_eq!(cell_rule.pattern, "every_2_cycles");
    assert_eq!(cell_rule.activity_id, Some(3));
    assert_eq!(cell_rule.visit_id, None);
    assert_eq!(cell_rule.raw_text, "every 2 cycles");
}

#[test]
fn normalization_is_deterministic() {
    let matrix = sample_matrix();
    assert_eq!(normalize(&matrix), normalize(&matrix));
}

#[test]
fn ragged_rows_are_tolerated() {
    let matrix = SoaMatrix {
        headers: vec!["V1".to_string(), "V2".to_string()],
        rows: vec![row("Short row", &["X"]), row("Long row", &["X", "X", "X"])],
    };
    let study = normalize(&matrix);
    // The trailing cell with no matching visit column is ignored.
    assert_eq!(study.visit_activities.len(), 3);
    assert!(study.visit_activities.iter().all(|va| va.visit_id <= 2));
}
