//! Project, well and configuration models, plus the persisted state blob

use serde::{Deserialize, Serialize};

use super::operation::{CompletionType, Operation, Personnel, Sector};

/// Colour assigned to unconfigured wells and sectors
pub const DEFAULT_COLOR: &str = "#000000";

/// Planned stage count used when the completion design does not provide one
pub const DEFAULT_PLANNED_STAGES: i32 = 26;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInfo {
    pub number: String,
    pub name: String,
    pub basin: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crew: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Well {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planned_number_of_stages: Option<i32>,
}

impl Well {
    pub fn planned_stages(&self) -> i32 {
        self.planned_number_of_stages
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_PLANNED_STAGES)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WellColorConfig {
    pub well_id: String,
    pub color: String,
    pub is_used: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorColorConfig {
    pub sector: Sector,
    pub color: String,
    pub is_used: bool,
}

/// Names the personnel selectors offer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonnelRoster {
    pub engineers: Vec<String>,
    pub pump_operators: Vec<String>,
    pub supervisors: Vec<String>,
    pub customer_reps: Vec<String>,
}

impl PersonnelRoster {
    /// Checks that every non-empty selection is a rostered name
    pub fn validate_selection(&self, personnel: &Personnel) -> Result<(), String> {
        let checks = [
            ("engineer", &personnel.engineer, &self.engineers),
            ("pump operator", &personnel.pump_operator, &self.pump_operators),
            ("supervisor", &personnel.supervisor, &self.supervisors),
            ("customer rep", &personnel.customer_rep, &self.customer_reps),
        ];

        for (role, selected, roster) in checks {
            if !selected.is_empty() && !roster.iter().any(|name| name == selected) {
                return Err(format!("{} '{}' is not in the project roster", role, selected));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectConfiguration {
    pub well_colors: Vec<WellColorConfig>,
    pub sector_colors: Vec<SectorColorConfig>,
    pub personnel: PersonnelRoster,
}

impl ProjectConfiguration {
    /// Fresh configuration for a newly imported project: every well and every
    /// sector in use, empty roster
    pub fn for_wells(wells: &[Well]) -> Self {
        Self {
            well_colors: wells
                .iter()
                .map(|well| WellColorConfig {
                    well_id: well.id.clone(),
                    color: DEFAULT_COLOR.to_string(),
                    is_used: true,
                })
                .collect(),
            sector_colors: Sector::ALL
                .into_iter()
                .map(|sector| SectorColorConfig {
                    sector,
                    color: DEFAULT_COLOR.to_string(),
                    is_used: true,
                })
                .collect(),
            personnel: PersonnelRoster::default(),
        }
    }

    pub fn is_well_used(&self, well_id: &str) -> bool {
        self.well_colors
            .iter()
            .any(|w| w.well_id == well_id && w.is_used)
    }

    pub fn is_sector_used(&self, sector: Sector) -> bool {
        self.sector_colors
            .iter()
            .any(|s| s.sector == sector && s.is_used)
    }
}

/// Everything the application keeps for the active project.
///
/// This is the unit of persistence: every save rewrites it whole.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectState {
    pub project: Option<ProjectInfo>,
    pub wells: Vec<Well>,
    pub operations: Vec<Operation>,
    pub configuration: ProjectConfiguration,
    pub personnel: Personnel,
    pub selected_completion_type: Option<CompletionType>,
}

impl ProjectState {
    pub fn well(&self, well_id: &str) -> Option<&Well> {
        self.wells.iter().find(|w| w.id == well_id)
    }
}

/// Result of importing a project from the upstream system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSetup {
    pub project: ProjectInfo,
    pub wells: Vec<Well>,
}

/// A stage slot of a well, as offered by the stage picker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stage {
    pub id: String,
    pub number: i32,
    pub well_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageStatus {
    pub id: String,
    pub number: i32,
    pub is_completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetupProjectRequest {
    pub number: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionTypeRequest {
    #[serde(default)]
    pub completion_type: Option<CompletionType>,
}

/// Response for GET /api/project
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummaryResponse {
    pub project: Option<ProjectInfo>,
    pub wells: Vec<Well>,
    pub configuration: ProjectConfiguration,
    pub personnel: Personnel,
    pub selected_completion_type: Option<CompletionType>,
    pub operation_count: usize,
}

impl From<ProjectState> for ProjectSummaryResponse {
    fn from(state: ProjectState) -> Self {
        Self {
            operation_count: state.operations.len(),
            project: state.project,
            wells: state.wells,
            configuration: state.configuration,
            personnel: state.personnel,
            selected_completion_type: state.selected_completion_type,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageProgressResponse {
    pub well_id: String,
    pub planned_number_of_stages: i32,
    pub stages: Vec<StageStatus>,
}
