//! Console summary tables.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use soa_model::{Deviation, ScheduleInstance};
use soa_normalize::NormalizedStudy;

pub fn print_normalize_summary(study: &NormalizedStudy) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Table"), header_cell("Rows")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("visits"), Cell::new(study.visits.len())]);
    table.add_row(vec![
        Cell::new("activities"),
        Cell::new(study.activities.len()),
    ]);
    table.add_row(vec![
        Cell::new("visit_activities"),
        Cell::new(study.visit_activities.len()),
    ]);
    table.add_row(vec![
        Cell::new("activity_categories"),
        Cell::new(study.activity_categories.len()),
    ]);
    table.add_row(vec![
        Cell::new("schedule_rules"),
        Cell::new(study.schedule_rules.len()),
    ]);
    println!("{table}");
}

pub fn print_instances(instances: &[ScheduleInstance]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rule"),
        header_cell("Occurrence"),
        header_cell("Date"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 1, CellAlignment::Right);
    for instance in instances {
        table.add_row(vec![
            Cell::new(instance.rule_id),
            Cell::new(instance.occurrence_index),
            Cell::new(instance.date),
        ]);
    }
    println!("{table}");
}

pub fn print_deviations(deviations: &[Deviation]) {
    if deviations.is_empty() {
        println!("No interval deviations detected.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("From"),
        header_cell("To"),
        header_cell("Expected (d)"),
        header_cell("Actual (d)"),
        header_cell("Delta (d)"),
    ]);
    apply_table_style(&mut table);
    for index in 0..5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for deviation in deviations {
        table.add_row(vec![
            Cell::new(deviation.first_ref_id),
            Cell::new(deviation.second_ref_id),
            Cell::new(deviation.expected_interval_days),
            Cell::new(deviation.actual_interval_days),
            Cell::new(deviation.delta_days)
                .fg(Color::Red)
                .add_attribute(Attribute::Bold),
        ]);
    }
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}
