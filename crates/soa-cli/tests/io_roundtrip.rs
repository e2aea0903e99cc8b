//! Round-trip tests for the normalized-table CSV files.

use std::fs;
use std::path::PathBuf;
use std::process;

use soa_cli::io::{
    load_activities, load_activity_categories, load_rules, load_visit_activities, load_visits,
    read_matrix, write_tables,
};
use soa_normalize::{MatrixRow, SoaMatrix, normalize};

fn scratch_dir(label: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("soa-cli-{label}-{}", process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn sample_matrix() -> SoaMatrix {
    SoaMatrix {
        headers: vec![
            "Screening (SCR) [-28 to -1]".to_string(),
            "Cycle 1 Day 1 (C1D1)".to_string(),
            "Cycle 2 Day 1 (C2D1) [±3d]".to_string(),
            "End of Treatment (EOT)".to_string(),
        ],
        rows: vec![
            MatrixRow {
                activity: "CT/MRI tumor assessment".to_string(),
                cells: vec![
                    "X".to_string(),
                    String::new(),
                    "X q12w".to_string(),
                    "X".to_string(),
                ],
            },
            MatrixRow {
                activity: "Hematology panel".to_string(),
                cells: vec![
                    "X".to_string(),
                    "X".to_string(),
                    "X".to_string(),
                    "X".to_string(),
                ],
            },
        ],
    }
}

#[test]
fn tables_round_trip_through_csv() {
    let study = normalize(&sample_matrix());
    let dir = scratch_dir("roundtrip");

    write_tables(&dir, &study).unwrap();

    assert_eq!(load_visits(&dir).unwrap(), study.visits);
    assert_eq!(load_activities(&dir).unwrap(), study.activities);
    assert_eq!(load_visit_activities(&dir).unwrap(), study.visit_activities);
    assert_eq!(
        load_activity_categories(&dir).unwrap(),
        study.activity_categories
    );
    assert_eq!(load_rules(&dir).unwrap(), study.schedule_rules);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn read_matrix_tolerates_ragged_rows() {
    let dir = scratch_dir("ragged");
    let path = dir.join("soa.csv");
    fs::write(
        &path,
        "Activity,Screening (SCR),Cycle 1 Day 1 (C1D1)\n\
         ECG,X\n\
         Vital signs,X,X\n",
    )
    .unwrap();

    let matrix = read_matrix(&path).unwrap();
    assert_eq!(matrix.headers.len(), 2);
    assert_eq!(matrix.rows.len(), 2);
    assert_eq!(matrix.rows[0].activity, "ECG");
    assert_eq!(matrix.rows[0].cells.len(), 1);
    assert_eq!(matrix.rows[1].cells.len(), 2);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn read_matrix_rejects_empty_file() {
    let dir = scratch_dir("empty");
    let path = dir.join("empty.csv");
    fs::write(&path, "").unwrap();

    assert!(read_matrix(&path).is_err());

    fs::remove_dir_all(&dir).unwrap();
}
