//! Read-only views over the operation set

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::operation::{Operation, Personnel, Sector};
use super::project::Well;

/// Operations that share the exact same start time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeGroup {
    pub start_time: DateTime<Utc>,
    pub operations: Vec<Operation>,
}

/// Idle stretch between one operation's end and the next one's start
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineGap {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedResponse {
    pub groups: Vec<TimeGroup>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorListResponse {
    pub sectors: Vec<Sector>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorTimelineResponse {
    pub sector: Sector,
    pub groups: Vec<TimeGroup>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WellListResponse {
    pub wells: Vec<Well>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WellTimelineResponse {
    pub well_id: String,
    pub well_name: String,
    pub groups: Vec<TimeGroup>,
    pub gaps: Vec<TimelineGap>,
}

/// One row of the legacy ("old timeline") table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    pub id: String,
    pub personnel: Personnel,
    #[serde(rename = "type")]
    pub operation_type: String,
    pub sector: String,
    pub well_name: String,
    pub stage: Option<i32>,
    pub party: String,
    pub main_event: String,
    pub completed: bool,
    pub start_time: DateTime<Utc>,
    /// Whole minutes between start and end, seconds ignored
    pub minutes: Option<i64>,
    pub end_time: Option<DateTime<Utc>>,
    pub notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableResponse {
    pub rows: Vec<TableRow>,
}
