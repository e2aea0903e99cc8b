//! CSV interchange for the pipeline: the wide input matrix and the five
//! normalized tables.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::Serialize;
use serde::de::DeserializeOwned;

use soa_model::{Activity, ActivityCategory, ScheduleRule, Visit, VisitActivity};
use soa_normalize::{MatrixRow, NormalizedStudy, SoaMatrix};

pub const VISITS_FILE: &str = "visits.csv";
pub const ACTIVITIES_FILE: &str = "activities.csv";
pub const VISIT_ACTIVITIES_FILE: &str = "visit_activities.csv";
pub const ACTIVITY_CATEGORIES_FILE: &str = "activity_categories.csv";
pub const SCHEDULE_RULES_FILE: &str = "schedule_rules.csv";

/// Read a wide SoA CSV: first row is the header, first column the activity
/// names. Ragged rows are tolerated.
pub fn read_matrix(path: &Path) -> Result<SoaMatrix> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("open {}", path.display()))?;

    let mut records = reader.records();
    let header = records
        .next()
        .ok_or_else(|| anyhow!("{}: empty CSV", path.display()))?
        .with_context(|| format!("read header of {}", path.display()))?;
    let headers: Vec<String> = header.iter().skip(1).map(String::from).collect();

    let mut rows = Vec::new();
    for record in records {
        let record = record.with_context(|| format!("read row of {}", path.display()))?;
        rows.push(MatrixRow {
            activity: record.get(0).unwrap_or("").to_string(),
            cells: record.iter().skip(1).map(String::from).collect(),
        });
    }
    Ok(SoaMatrix { headers, rows })
}

/// Write the five normalized tables into `out_dir`.
pub fn write_tables(out_dir: &Path, study: &NormalizedStudy) -> Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("create output directory {}", out_dir.display()))?;
    write_table(&out_dir.join(VISITS_FILE), &study.visits)?;
    write_table(&out_dir.join(ACTIVITIES_FILE), &study.activities)?;
    write_table(&out_dir.join(VISIT_ACTIVITIES_FILE), &study.visit_activities)?;
    write_table(
        &out_dir.join(ACTIVITY_CATEGORIES_FILE),
        &study.activity_categories,
    )?;
    write_table(&out_dir.join(SCHEDULE_RULES_FILE), &study.schedule_rules)?;
    Ok(())
}

fn write_table<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("create {}", path.display()))?;
    for row in rows {
        writer
            .serialize(row)
            .with_context(|| format!("write {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("flush {}", path.display()))?;
    Ok(())
}

fn load_table<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let mut reader =
        csv::Reader::from_path(path).with_context(|| format!("open {}", path.display()))?;
    let mut rows = Vec::new();
    for record in reader.deserialize() {
        rows.push(record.with_context(|| format!("parse {}", path.display()))?);
    }
    Ok(rows)
}

pub fn load_visits(normalized_dir: &Path) -> Result<Vec<Visit>> {
    load_table(&normalized_dir.join(VISITS_FILE))
}

pub fn load_activities(normalized_dir: &Path) -> Result<Vec<Activity>> {
    load_table(&normalized_dir.join(ACTIVITIES_FILE))
}

pub fn load_visit_activities(normalized_dir: &Path) -> Result<Vec<VisitActivity>> {
    load_table(&normalized_dir.join(VISIT_ACTIVITIES_FILE))
}

pub fn load_activity_categories(normalized_dir: &Path) -> Result<Vec<ActivityCategory>> {
    load_table(&normalized_dir.join(ACTIVITY_CATEGORIES_FILE))
}

pub fn load_rules(normalized_dir: &Path) -> Result<Vec<ScheduleRule>> {
    load_table(&normalized_dir.join(SCHEDULE_RULES_FILE))
}
