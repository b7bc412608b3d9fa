//! Load/save boundary for the application state
//!
//! The store never touches storage directly: it hands the whole
//! [`ProjectState`] to a [`StateRepository`] after every mutation and asks
//! for it back once at start-up.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use std::path::{Path, PathBuf};

use crate::entities::{operations, prelude::*, projects, wells};
use crate::models::operation::{CompletionType, Operation, OperationType, Personnel, Sector};
use crate::models::project::{ProjectConfiguration, ProjectInfo, ProjectState, Well};

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Corrupt persisted state: {0}")]
    Corrupt(String),
    #[error("Failed to encode state: {0}")]
    Encode(String),
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

#[async_trait]
pub trait StateRepository: Send + Sync {
    /// Returns `Ok(None)` when nothing has been saved yet
    async fn load(&self) -> Result<Option<ProjectState>, RepositoryError>;

    /// Replaces whatever was stored with `state`
    async fn save(&self, state: &ProjectState) -> Result<(), RepositoryError>;
}

/// The whole state as a single JSON document on disk
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl StateRepository for JsonFileRepository {
    async fn load(&self) -> Result<Option<ProjectState>, RepositoryError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let state: ProjectState =
            serde_json::from_slice(&bytes).map_err(|e| RepositoryError::Corrupt(e.to_string()))?;

        tracing::debug!(
            path = %self.path.display(),
            operations = state.operations.len(),
            "Loaded state file"
        );

        Ok(Some(state))
    }

    async fn save(&self, state: &ProjectState) -> Result<(), RepositoryError> {
        let json =
            serde_json::to_vec_pretty(state).map_err(|e| RepositoryError::Encode(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        // Readers never observe a half-written file
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        Ok(())
    }
}

/// Relational persistence over the `projects`, `wells` and `operations` tables.
///
/// The active project is the most recently saved one.
pub struct DbStateRepository {
    db: DatabaseConnection,
}

impl DbStateRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StateRepository for DbStateRepository {
    async fn load(&self) -> Result<Option<ProjectState>, RepositoryError> {
        let Some(project) = Projects::find()
            .order_by_desc(projects::Column::UpdatedAt)
            .order_by_desc(projects::Column::Id)
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        let well_rows = Wells::find()
            .filter(wells::Column::ProjectId.eq(project.id))
            .order_by_asc(wells::Column::Id)
            .all(&self.db)
            .await?;

        let operation_rows = Operations::find()
            .filter(operations::Column::ProjectId.eq(project.id))
            .order_by_asc(operations::Column::StartTime)
            .all(&self.db)
            .await?;

        let configuration: ProjectConfiguration = serde_json::from_str(&project.configuration)
            .map_err(|e| RepositoryError::Corrupt(format!("project configuration: {}", e)))?;
        let personnel: Personnel = serde_json::from_str(&project.personnel)
            .map_err(|e| RepositoryError::Corrupt(format!("project personnel: {}", e)))?;
        let selected_completion_type = project
            .selected_completion_type
            .as_deref()
            .map(str::parse::<CompletionType>)
            .transpose()
            .map_err(RepositoryError::Corrupt)?;

        let operations = operation_rows
            .into_iter()
            .map(operation_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!(
            project = %project.number,
            wells = well_rows.len(),
            operations = operations.len(),
            "Loaded project state from database"
        );

        Ok(Some(ProjectState {
            project: Some(ProjectInfo {
                number: project.number,
                name: project.name,
                basin: project.basin,
                crew: project.crew,
            }),
            wells: well_rows
                .into_iter()
                .map(|row| Well {
                    id: row.well_id,
                    name: row.name,
                    planned_number_of_stages: row.planned_number_of_stages,
                })
                .collect(),
            operations,
            configuration,
            personnel,
            selected_completion_type,
        }))
    }

    async fn save(&self, state: &ProjectState) -> Result<(), RepositoryError> {
        let Some(info) = &state.project else {
            tracing::debug!("No project configured, nothing to persist");
            return Ok(());
        };

        let configuration = serde_json::to_string(&state.configuration)
            .map_err(|e| RepositoryError::Encode(e.to_string()))?;
        let personnel = serde_json::to_string(&state.personnel)
            .map_err(|e| RepositoryError::Encode(e.to_string()))?;
        let selected_completion_type = state
            .selected_completion_type
            .map(|ct| ct.as_str().to_string());

        let txn = self.db.begin().await?;

        let existing = Projects::find()
            .filter(projects::Column::Number.eq(&info.number))
            .one(&txn)
            .await?;

        let project_id = match existing {
            Some(model) => {
                let mut active_model = model.into_active_model();
                active_model.name = Set(info.name.clone());
                active_model.basin = Set(info.basin.clone());
                active_model.crew = Set(info.crew.clone());
                active_model.configuration = Set(configuration);
                active_model.personnel = Set(personnel);
                active_model.selected_completion_type = Set(selected_completion_type);
                active_model.updated_at = Set(Utc::now().into());
                active_model.update(&txn).await?.id
            }
            None => {
                let new_project = projects::ActiveModel {
                    number: Set(info.number.clone()),
                    name: Set(info.name.clone()),
                    basin: Set(info.basin.clone()),
                    crew: Set(info.crew.clone()),
                    configuration: Set(configuration),
                    personnel: Set(personnel),
                    selected_completion_type: Set(selected_completion_type),
                    updated_at: Set(Utc::now().into()),
                    ..Default::default()
                };
                new_project.insert(&txn).await?.id
            }
        };

        // Wells and operations are rewritten wholesale
        Wells::delete_many()
            .filter(wells::Column::ProjectId.eq(project_id))
            .exec(&txn)
            .await?;
        Operations::delete_many()
            .filter(operations::Column::ProjectId.eq(project_id))
            .exec(&txn)
            .await?;

        if !state.wells.is_empty() {
            let rows = state.wells.iter().map(|well| wells::ActiveModel {
                project_id: Set(project_id),
                well_id: Set(well.id.clone()),
                name: Set(well.name.clone()),
                planned_number_of_stages: Set(well.planned_number_of_stages),
                ..Default::default()
            });
            Wells::insert_many(rows).exec_without_returning(&txn).await?;
        }

        if !state.operations.is_empty() {
            let rows = state
                .operations
                .iter()
                .map(|op| operation_to_row(project_id, op))
                .collect::<Result<Vec<_>, _>>()?;
            Operations::insert_many(rows)
                .exec_without_returning(&txn)
                .await?;
        }

        txn.commit().await?;

        tracing::debug!(
            project = %info.number,
            wells = state.wells.len(),
            operations = state.operations.len(),
            "Saved project state to database"
        );

        Ok(())
    }
}

fn operation_to_row(
    project_id: i32,
    op: &Operation,
) -> Result<operations::ActiveModel, RepositoryError> {
    let personnel = op
        .personnel
        .as_ref()
        .map(serde_json::to_string)
        .transpose()
        .map_err(|e| RepositoryError::Encode(e.to_string()))?;

    Ok(operations::ActiveModel {
        id: Set(op.id.clone()),
        project_id: Set(project_id),
        well_id: Set(op.well_id.clone()),
        operation_type: Set(op.operation_type.as_str().to_string()),
        sector: Set(op.sector.as_str().to_string()),
        start_time: Set(op.start_time.into()),
        end_time: Set(op.end_time.map(Into::into)),
        stage: Set(op.stage),
        party: Set(op.party.clone()),
        main_event: Set(op.main_event.clone()),
        completion_type: Set(op.completion_type.map(|ct| ct.as_str().to_string())),
        completed: Set(op.completed),
        personnel: Set(personnel),
        comments: Set(op.comments.clone()),
    })
}

fn operation_from_row(row: operations::Model) -> Result<Operation, RepositoryError> {
    let personnel = row
        .personnel
        .as_deref()
        .map(serde_json::from_str::<Personnel>)
        .transpose()
        .map_err(|e| RepositoryError::Corrupt(format!("operation {} personnel: {}", row.id, e)))?;

    Ok(Operation {
        operation_type: row
            .operation_type
            .parse::<OperationType>()
            .map_err(RepositoryError::Corrupt)?,
        sector: row.sector.parse::<Sector>().map_err(RepositoryError::Corrupt)?,
        completion_type: row
            .completion_type
            .as_deref()
            .map(str::parse::<CompletionType>)
            .transpose()
            .map_err(RepositoryError::Corrupt)?,
        start_time: row.start_time.with_timezone(&Utc),
        end_time: row.end_time.map(|t| t.with_timezone(&Utc)),
        id: row.id,
        well_id: row.well_id,
        stage: row.stage,
        party: row.party,
        main_event: row.main_event,
        completed: row.completed,
        personnel,
        comments: row.comments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn sample_state() -> ProjectState {
        let wells = vec![Well {
            id: "W-1".to_string(),
            name: "Eagle 1H".to_string(),
            planned_number_of_stages: Some(40),
        }];
        ProjectState {
            project: Some(ProjectInfo {
                number: "P-7".to_string(),
                name: "Eagle Pad".to_string(),
                basin: "Permian".to_string(),
                crew: Some("Red".to_string()),
            }),
            configuration: ProjectConfiguration::for_wells(&wells),
            wells,
            operations: vec![Operation {
                id: "op-1".to_string(),
                well_id: "W-1".to_string(),
                operation_type: OperationType::Pump,
                sector: Sector::A,
                start_time: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
                end_time: None,
                stage: Some(1),
                party: Some("LOS".to_string()),
                main_event: Some("Frac".to_string()),
                completion_type: None,
                completed: true,
                personnel: None,
                comments: None,
            }],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_json_file_missing_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileRepository::new(dir.path().join("state.json"));
        assert!(repo.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_json_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileRepository::new(dir.path().join("nested").join("state.json"));
        let state = sample_state();

        repo.save(&state).await.unwrap();
        let loaded = repo.load().await.unwrap().unwrap();
        assert_eq!(loaded, state);
        assert!(!repo.path().with_extension("tmp").exists());
    }

    #[tokio::test]
    async fn test_json_file_corrupt_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, b"{not json").unwrap();

        let repo = JsonFileRepository::new(path);
        let result = repo.load().await;
        assert!(matches!(result, Err(RepositoryError::Corrupt(_))));
    }

    #[test]
    fn test_operation_row_round_trip() {
        let state = sample_state();
        let op = &state.operations[0];
        let row = operation_to_row(3, op).unwrap();

        let model = operations::Model {
            id: row.id.unwrap(),
            project_id: row.project_id.unwrap(),
            well_id: row.well_id.unwrap(),
            operation_type: row.operation_type.unwrap(),
            sector: row.sector.unwrap(),
            start_time: row.start_time.unwrap(),
            end_time: row.end_time.unwrap(),
            stage: row.stage.unwrap(),
            party: row.party.unwrap(),
            main_event: row.main_event.unwrap(),
            completion_type: row.completion_type.unwrap(),
            completed: row.completed.unwrap(),
            personnel: row.personnel.unwrap(),
            comments: row.comments.unwrap(),
        };
        assert_eq!(model.project_id, 3);
        assert_eq!(model.operation_type, "PUMP");
        assert_eq!(operation_from_row(model).unwrap(), *op);
    }
}
