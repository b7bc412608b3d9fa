//! Timeline presenters
//!
//! Read-only views over a state snapshot. None of them compute end times;
//! they show what the resolver stored.

use chrono::{DateTime, Utc};
use std::collections::HashSet;

use crate::models::operation::{Operation, OperationType, Sector};
use crate::models::project::{ProjectState, StageProgressResponse, StageStatus, Well};
use crate::models::timeline::{
    FeedResponse, SectorTimelineResponse, TableRow, TimeGroup, TimelineGap, WellTimelineResponse,
};

pub const UNKNOWN_WELL: &str = "Unknown Well";

/// First occurrence of every id, in input order
pub fn dedupe(operations: &[Operation]) -> Vec<Operation> {
    let mut seen = HashSet::new();
    operations
        .iter()
        .filter(|op| seen.insert(op.id.as_str()))
        .cloned()
        .collect()
}

/// Newest first; equal start times keep their input order
pub fn newest_first(operations: &[Operation]) -> Vec<Operation> {
    let mut sorted = dedupe(operations);
    sorted.sort_by(|a, b| b.start_time.cmp(&a.start_time));
    sorted
}

fn oldest_first(operations: &[Operation]) -> Vec<Operation> {
    let mut sorted = dedupe(operations);
    sorted.sort_by_key(|op| op.start_time);
    sorted
}

/// Bucket operations by exact start time, newest bucket first
pub fn group_by_start(operations: &[Operation]) -> Vec<TimeGroup> {
    let mut groups: Vec<TimeGroup> = Vec::new();

    for op in newest_first(operations) {
        match groups.last_mut() {
            Some(group) if group.start_time == op.start_time => group.operations.push(op),
            _ => groups.push(TimeGroup {
                start_time: op.start_time,
                operations: vec![op],
            }),
        }
    }

    groups
}

pub fn feed(operations: &[Operation]) -> FeedResponse {
    let groups = group_by_start(operations);
    let total = groups.iter().map(|g| g.operations.len()).sum();
    FeedResponse { groups, total }
}

/// Sectors that get their own tab: present in the operations, marked used,
/// never PAD
pub fn active_sectors(state: &ProjectState) -> Vec<Sector> {
    let mut sectors: Vec<Sector> = Vec::new();
    for op in &state.operations {
        if !op.sector.is_pad()
            && state.configuration.is_sector_used(op.sector)
            && !sectors.contains(&op.sector)
        {
            sectors.push(op.sector);
        }
    }

    sectors.sort_by_key(|s| s.as_str().to_lowercase());
    sectors
}

/// Operations of one sector together with the PAD operations around them
pub fn sector_view(operations: &[Operation], sector: Sector) -> SectorTimelineResponse {
    SectorTimelineResponse {
        sector,
        groups: group_by_start(&sector_operations(operations, sector)),
    }
}

pub fn sector_operations(operations: &[Operation], sector: Sector) -> Vec<Operation> {
    operations
        .iter()
        .filter(|op| op.sector == sector || op.sector.is_pad())
        .cloned()
        .collect()
}

/// Wells that have at least one operation, in order of their first
/// operation
pub fn wells_with_operations(state: &ProjectState) -> Vec<Well> {
    let mut wells: Vec<Well> = Vec::new();

    for op in oldest_first(&state.operations) {
        if wells.iter().any(|w| w.id == op.well_id) {
            continue;
        }
        wells.push(state.well(&op.well_id).cloned().unwrap_or_else(|| Well {
            id: op.well_id.clone(),
            name: UNKNOWN_WELL.to_string(),
            planned_number_of_stages: None,
        }));
    }

    wells
}

pub fn well_name(state: &ProjectState, well_id: &str) -> String {
    state
        .well(well_id)
        .map(|w| w.name.clone())
        .unwrap_or_else(|| UNKNOWN_WELL.to_string())
}

pub fn well_operations(operations: &[Operation], well_id: &str) -> Vec<Operation> {
    operations
        .iter()
        .filter(|op| op.well_id == well_id)
        .cloned()
        .collect()
}

/// `None` when the well is neither configured nor referenced
pub fn well_view(state: &ProjectState, well_id: &str) -> Option<WellTimelineResponse> {
    let operations = well_operations(&state.operations, well_id);
    if operations.is_empty() && state.well(well_id).is_none() {
        return None;
    }

    Some(WellTimelineResponse {
        well_id: well_id.to_string(),
        well_name: well_name(state, well_id),
        groups: group_by_start(&operations),
        gaps: gaps(&operations),
    })
}

/// Idle stretches between consecutive operations, oldest first
pub fn gaps(operations: &[Operation]) -> Vec<TimelineGap> {
    oldest_first(operations)
        .windows(2)
        .filter_map(|pair| {
            let end = pair[0].end_time?;
            let next_start = pair[1].start_time;
            (end < next_start).then_some(TimelineGap {
                start: end,
                end: next_start,
            })
        })
        .collect()
}

/// Rows of the legacy table, newest first
pub fn legacy_table(state: &ProjectState) -> Vec<TableRow> {
    newest_first(&state.operations)
        .into_iter()
        .map(|op| TableRow {
            well_name: well_name(state, &op.well_id),
            minutes: op.end_time.map(|end| whole_minutes(op.start_time, end)),
            personnel: op.personnel.unwrap_or_default(),
            operation_type: op.operation_type.to_string(),
            sector: op.sector.to_string(),
            stage: op.stage,
            party: op.party.unwrap_or_default(),
            main_event: op.main_event.unwrap_or_default(),
            completed: op.completed,
            start_time: op.start_time,
            end_time: op.end_time,
            notes: op.comments.unwrap_or_default(),
            id: op.id,
        })
        .collect()
}

fn truncate_to_minute(time: DateTime<Utc>) -> i64 {
    time.timestamp().div_euclid(60)
}

/// Minutes between two instants with the seconds of both dropped first
pub fn whole_minutes(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    truncate_to_minute(end) - truncate_to_minute(start)
}

/// `"{h}h {m}m"`, or `Ongoing` while the operation has no end
pub fn format_duration(start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> String {
    match end {
        Some(end) => {
            let minutes = whole_minutes(start, end);
            format!("{}h {}m", minutes / 60, minutes % 60)
        }
        None => "Ongoing".to_string(),
    }
}

/// Stages `1..=planned` of a well, completed once a completed PUMP
/// operation on that stage exists
pub fn stage_progress(state: &ProjectState, well_id: &str) -> Option<StageProgressResponse> {
    let well = state.well(well_id)?;
    let planned = well.planned_stages();

    let completed: HashSet<i32> = state
        .operations
        .iter()
        .filter(|op| {
            op.well_id == well_id && op.completed && op.operation_type == OperationType::Pump
        })
        .filter_map(|op| op.stage)
        .collect();

    Some(StageProgressResponse {
        well_id: well_id.to_string(),
        planned_number_of_stages: planned,
        stages: (1..=planned)
            .map(|number| StageStatus {
                id: format!("{}-stage-{}", well_id, number),
                number,
                is_completed: completed.contains(&number),
            })
            .collect(),
    })
}
