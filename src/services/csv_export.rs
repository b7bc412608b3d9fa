//! CSV downloads of the timeline views

use chrono::{DateTime, Utc};

use crate::models::operation::{Operation, Sector};
use crate::models::timeline::TableRow;
use crate::services::timeline::newest_first;

pub const FEED_FILENAME: &str = "sacred-timeline.csv";
pub const TABLE_FILENAME: &str = "old-timeline.csv";

const STANDARD_HEADERS: [&str; 7] = [
    "Well ID",
    "Operation Type",
    "Party",
    "Stage",
    "Start Time",
    "End Time",
    "Duration (hours)",
];

const LEGACY_HEADERS: [&str; 15] = [
    "Engineer",
    "Pump Operator",
    "Supervisor",
    "Customer Rep",
    "Type",
    "Sector",
    "Well",
    "Stage",
    "Party",
    "Main Event",
    "Complete",
    "Date/Time",
    "Minutes",
    "EndDate/Time",
    "Notes",
];

const ONGOING: &str = "Ongoing";

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn standard_time(time: DateTime<Utc>) -> String {
    time.format("%Y-%m-%d %H:%M:%S").to_string()
}

fn legacy_time(time: DateTime<Utc>) -> String {
    time.format("%b %-d, %H:%M").to_string()
}

fn duration_hours(start: DateTime<Utc>, end: DateTime<Utc>) -> String {
    let hours = (end - start).num_milliseconds() as f64 / 3_600_000.0;
    format!("{:.2}", hours)
}

/// Stage 0 exports as a blank cell, like a missing stage
fn stage_cell(stage: Option<i32>) -> Option<String> {
    stage.filter(|&s| s != 0).map(|s| s.to_string())
}

/// Feed, sector and well exports: one row per operation, newest first
pub fn operations_csv(operations: &[Operation]) -> String {
    let mut csv = STANDARD_HEADERS.join(",");
    csv.push('\n');

    for op in newest_first(operations) {
        let row = [
            quote(&op.well_id),
            quote(op.operation_type.as_str()),
            quote(op.party.as_deref().unwrap_or_default()),
            stage_cell(op.stage).unwrap_or_else(|| quote("")),
            quote(&standard_time(op.start_time)),
            quote(&op.end_time.map(standard_time).unwrap_or_else(|| ONGOING.to_string())),
            op.end_time
                .map(|end| duration_hours(op.start_time, end))
                .unwrap_or_else(|| quote(ONGOING)),
        ];
        csv.push_str(&row.join(","));
        csv.push('\n');
    }

    csv
}

/// Legacy table export, every cell quoted
pub fn table_csv(rows: &[TableRow]) -> String {
    let mut lines = vec![LEGACY_HEADERS.join(",")];

    for row in rows {
        let cells = [
            row.personnel.engineer.clone(),
            row.personnel.pump_operator.clone(),
            row.personnel.supervisor.clone(),
            row.personnel.customer_rep.clone(),
            row.operation_type.clone(),
            row.sector.clone(),
            row.well_name.clone(),
            stage_cell(row.stage).unwrap_or_default(),
            row.party.clone(),
            row.main_event.clone(),
            if row.completed { "Yes" } else { "No" }.to_string(),
            legacy_time(row.start_time),
            row.minutes.map(|m| m.to_string()).unwrap_or_default(),
            row.end_time.map(legacy_time).unwrap_or_default(),
            row.notes.clone(),
        ];
        lines.push(
            cells
                .iter()
                .map(|cell| quote(cell))
                .collect::<Vec<_>>()
                .join(","),
        );
    }

    lines.join("\n")
}

fn safe_filename_part(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '"' | '/' | '\\' | '\r' | '\n' => '_',
            c => c,
        })
        .collect()
}

pub fn sector_filename(sector: Sector) -> String {
    format!("{}-timeline.csv", sector)
}

pub fn well_filename(well_name: &str) -> String {
    format!("{}-timeline.csv", safe_filename_part(well_name))
}
