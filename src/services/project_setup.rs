//! Project import: turns upstream project, well and completion-design
//! records into the identity and well list a new project starts with.

use futures_util::future::join_all;

use crate::models::project::{ProjectInfo, ProjectSetup, Well, DEFAULT_PLANNED_STAGES};
use crate::models::upstream::ApiProjectResponse;
use crate::services::oilfield_api::OilfieldApiService;

const DEFAULT_BASIN: &str = "Development Basin";
const MOCK_CREW: &str = "Mock Crew";

pub async fn import_project(api: &OilfieldApiService, project_number: &str) -> ProjectSetup {
    let project = api.get_project_by_number(project_number).await;

    if project.well_ids.is_empty() {
        tracing::info!(
            project_number = %project_number,
            "Upstream project has no wells, using development wells"
        );
        return development_setup(project_number);
    }

    tracing::info!(
        project_number = %project_number,
        wells = project.well_ids.len(),
        "Fetching well details"
    );

    let wells = join_all(project.well_ids.iter().map(|well| async move {
        let (info, design) = tokio::join!(
            api.get_well_info(&well.id),
            api.get_completion_design(&well.id)
        );

        Well {
            id: well.id.clone(),
            name: if info.well_name.is_empty() {
                format!("Well {}", well.id)
            } else {
                info.well_name
            },
            planned_number_of_stages: Some(if design.planned_number_of_stages > 0 {
                design.planned_number_of_stages
            } else {
                DEFAULT_PLANNED_STAGES
            }),
        }
    }))
    .await;

    ProjectSetup {
        project: project_info(&project, project_number),
        wells,
    }
}

fn project_info(project: &ApiProjectResponse, project_number: &str) -> ProjectInfo {
    ProjectInfo {
        number: project_number.to_string(),
        name: if project.pad_name.is_empty() {
            format!("Project {}", project_number)
        } else {
            project.pad_name.clone()
        },
        basin: if project.basin.is_empty() {
            DEFAULT_BASIN.to_string()
        } else {
            project.basin.clone()
        },
        crew: project
            .crews
            .first()
            .map(|c| c.label.clone())
            .filter(|label| !label.is_empty()),
    }
}

fn development_setup(project_number: &str) -> ProjectSetup {
    let wells = [
        ("well-1", "Well Alpha-1"),
        ("well-2", "Well Alpha-2"),
        ("well-3", "Well Beta-1"),
    ]
    .into_iter()
    .map(|(id, name)| Well {
        id: id.to_string(),
        name: name.to_string(),
        planned_number_of_stages: Some(DEFAULT_PLANNED_STAGES),
    })
    .collect();

    ProjectSetup {
        project: ProjectInfo {
            number: project_number.to_string(),
            name: format!("Project {}", project_number),
            basin: DEFAULT_BASIN.to_string(),
            crew: Some(MOCK_CREW.to_string()),
        },
        wells,
    }
}
