//! Operation Store
//!
//! Holds the active project's state in memory. Mutations are serialized by a
//! single lock, and each one finishes by recomputing every end time and
//! writing the whole state through the repository before the lock is
//! released.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::models::operation::{
    AddOperationsRequest, CompletionType, Operation, OperationDraft, Personnel, QuickAddRequest,
    Sector,
};
use crate::models::project::{ProjectConfiguration, ProjectSetup, ProjectState};
use crate::services::end_time_resolver::resolve_end_times;
use crate::services::state_repository::StateRepository;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0}")]
    Validation(String),
    #[error("Operation not found: {0}")]
    NotFound(String),
    #[error("No project configured")]
    NoProject,
}

pub struct OperationStore {
    state: Mutex<ProjectState>,
    repository: Arc<dyn StateRepository>,
}

impl OperationStore {
    /// Load the saved state, or start empty when there is none or it cannot
    /// be read
    pub async fn load(repository: Arc<dyn StateRepository>) -> Self {
        let mut state = match repository.load().await {
            Ok(Some(state)) => state,
            Ok(None) => {
                info!("No saved state found, starting with an empty project");
                ProjectState::default()
            }
            Err(e) => {
                warn!(error = %e, "Discarding unreadable saved state");
                ProjectState::default()
            }
        };

        resolve_end_times(&mut state.operations);

        info!(
            project = ?state.project.as_ref().map(|p| p.number.as_str()),
            wells = state.wells.len(),
            operations = state.operations.len(),
            "Operation store ready"
        );

        Self {
            state: Mutex::new(state),
            repository,
        }
    }

    pub async fn snapshot(&self) -> ProjectState {
        self.state.lock().await.clone()
    }

    /// All operations, in no guaranteed order
    pub async fn list(&self) -> Vec<Operation> {
        self.state.lock().await.operations.clone()
    }

    /// Start over with a freshly imported project
    pub async fn setup_project(&self, setup: ProjectSetup) -> ProjectState {
        let mut state = self.state.lock().await;

        info!(
            project = %setup.project.number,
            wells = setup.wells.len(),
            "Setting up project"
        );

        *state = ProjectState {
            configuration: ProjectConfiguration::for_wells(&setup.wells),
            project: Some(setup.project),
            wells: setup.wells,
            operations: Vec::new(),
            personnel: Personnel::default(),
            selected_completion_type: None,
        };

        self.persist(&state).await;
        state.clone()
    }

    /// Add a batch of operations sharing one start time.
    ///
    /// Either every draft is valid and the whole batch is stored, or nothing
    /// is.
    pub async fn add(&self, request: AddOperationsRequest) -> Result<Vec<Operation>, StoreError> {
        let mut state = self.state.lock().await;
        let start_time = request.start_time.unwrap_or_else(Utc::now);
        let created = Self::insert_drafts(&mut state, request.operations, start_time)?;
        self.commit(&mut state).await;

        Ok(Self::collect_by_id(&state, &created))
    }

    /// Log a preset operation starting now
    pub async fn quick_add(&self, request: QuickAddRequest) -> Result<Operation, StoreError> {
        let mut state = self.state.lock().await;
        Self::require_project(&state)?;

        let well_id = request
            .well_id
            .filter(|id| !id.trim().is_empty())
            .or_else(|| last_entered_well(&state.operations))
            .or_else(|| {
                state
                    .wells
                    .iter()
                    .find(|w| state.configuration.is_well_used(&w.id))
                    .map(|w| w.id.clone())
            })
            .ok_or_else(|| StoreError::Validation("No well available for quick add".to_string()))?;

        let (operation_type, party, main_event) = request.preset.defaults();
        let draft = OperationDraft {
            well_id,
            operation_type: Some(operation_type),
            sector: Some(request.sector.unwrap_or(Sector::Pad)),
            party: Some(party.to_string()),
            main_event: main_event.map(str::to_string),
            ..Default::default()
        };

        let created = Self::insert_drafts(&mut state, vec![draft], Utc::now())?;
        self.commit(&mut state).await;

        Self::collect_by_id(&state, &created)
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::NotFound(created.join(",")))
    }

    /// Replace the editable fields of an operation
    pub async fn edit(&self, id: &str, draft: OperationDraft) -> Result<Operation, StoreError> {
        let mut state = self.state.lock().await;
        let index = Self::position(&state, id)?;
        let existing = state.operations[index].clone();

        let personnel = draft.personnel.clone().or(existing.personnel.clone());
        let edited = build_operation(
            &state,
            id.to_string(),
            draft,
            existing.start_time,
            personnel,
            None,
        )
        .map_err(StoreError::Validation)?;

        info!(
            operation_id = %id,
            sector = %edited.sector,
            start_time = %edited.start_time,
            "Editing operation"
        );

        state.operations[index] = edited;
        self.commit(&mut state).await;

        Ok(state.operations[index].clone())
    }

    pub async fn toggle_completed(&self, id: &str) -> Result<Operation, StoreError> {
        let mut state = self.state.lock().await;
        let index = Self::position(&state, id)?;
        state.operations[index].completed = !state.operations[index].completed;
        self.commit(&mut state).await;

        Ok(state.operations[index].clone())
    }

    pub async fn delete(&self, id: &str) -> Result<Operation, StoreError> {
        let mut state = self.state.lock().await;
        let index = Self::position(&state, id)?;
        let removed = state.operations.remove(index);

        info!(operation_id = %id, sector = %removed.sector, "Deleting operation");

        self.commit(&mut state).await;
        Ok(removed)
    }

    pub async fn update_configuration(
        &self,
        configuration: ProjectConfiguration,
    ) -> Result<ProjectConfiguration, StoreError> {
        let mut state = self.state.lock().await;
        Self::require_project(&state)?;

        state.configuration = configuration;
        self.persist(&state).await;
        Ok(state.configuration.clone())
    }

    /// Select the crew stamped on newly added operations
    pub async fn update_personnel(&self, personnel: Personnel) -> Result<Personnel, StoreError> {
        let mut state = self.state.lock().await;
        Self::require_project(&state)?;
        state
            .configuration
            .personnel
            .validate_selection(&personnel)
            .map_err(StoreError::Validation)?;

        state.personnel = personnel;
        self.persist(&state).await;
        Ok(state.personnel.clone())
    }

    pub async fn set_completion_type(
        &self,
        completion_type: Option<CompletionType>,
    ) -> Result<Option<CompletionType>, StoreError> {
        let mut state = self.state.lock().await;
        Self::require_project(&state)?;

        state.selected_completion_type = completion_type;
        self.persist(&state).await;
        Ok(state.selected_completion_type)
    }

    fn insert_drafts(
        state: &mut ProjectState,
        drafts: Vec<OperationDraft>,
        start_time: DateTime<Utc>,
    ) -> Result<Vec<String>, StoreError> {
        Self::require_project(state)?;
        if drafts.is_empty() {
            return Err(StoreError::Validation(
                "At least one operation is required".to_string(),
            ));
        }

        let personnel = state.personnel.clone();
        let completion_type = state.selected_completion_type;
        let mut new_operations = Vec::with_capacity(drafts.len());

        for (index, draft) in drafts.into_iter().enumerate() {
            let operation = build_operation(
                state,
                uuid::Uuid::new_v4().to_string(),
                draft,
                start_time,
                Some(personnel.clone()),
                completion_type,
            )
            .map_err(|e| StoreError::Validation(format!("Operation {}: {}", index + 1, e)))?;
            new_operations.push(operation);
        }

        let ids: Vec<String> = new_operations.iter().map(|op| op.id.clone()).collect();
        info!(count = ids.len(), start_time = %start_time, "Adding operations");
        state.operations.extend(new_operations);

        Ok(ids)
    }

    fn collect_by_id(state: &ProjectState, ids: &[String]) -> Vec<Operation> {
        ids.iter()
            .filter_map(|id| state.operations.iter().find(|op| &op.id == id).cloned())
            .collect()
    }

    fn position(state: &ProjectState, id: &str) -> Result<usize, StoreError> {
        state
            .operations
            .iter()
            .position(|op| op.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn require_project(state: &ProjectState) -> Result<(), StoreError> {
        match state.project {
            Some(_) => Ok(()),
            None => Err(StoreError::NoProject),
        }
    }

    async fn commit(&self, state: &mut ProjectState) {
        resolve_end_times(&mut state.operations);
        self.persist(state).await;
    }

    async fn persist(&self, state: &ProjectState) {
        if let Err(e) = self.repository.save(state).await {
            error!(error = %e, "Failed to persist project state");
        }
    }
}

/// Well of the most recently started operation
pub fn last_entered_well(operations: &[Operation]) -> Option<String> {
    operations
        .iter()
        .max_by_key(|op| op.start_time)
        .map(|op| op.well_id.clone())
}

/// Validate a draft and turn it into an operation with no end time
fn build_operation(
    state: &ProjectState,
    id: String,
    draft: OperationDraft,
    default_start: DateTime<Utc>,
    personnel: Option<Personnel>,
    default_completion_type: Option<CompletionType>,
) -> Result<Operation, String> {
    let well_id = draft.well_id.trim().to_string();
    if well_id.is_empty() {
        return Err("well is required".to_string());
    }
    if !state.wells.is_empty() && state.well(&well_id).is_none() {
        return Err(format!("unknown well '{}'", well_id));
    }
    let operation_type = draft
        .operation_type
        .ok_or_else(|| "type is required".to_string())?;
    let sector = draft
        .sector
        .ok_or_else(|| "sector is required".to_string())?;
    if let Some(stage) = draft.stage {
        if stage < 0 {
            return Err("stage cannot be negative".to_string());
        }
    }

    Ok(Operation {
        id,
        well_id,
        operation_type,
        sector,
        start_time: draft.start_time.unwrap_or(default_start),
        end_time: None,
        stage: draft.stage,
        party: non_empty(draft.party),
        main_event: non_empty(draft.main_event),
        completion_type: draft.completion_type.or(default_completion_type),
        completed: draft.completed,
        personnel,
        comments: non_empty(draft.comments),
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
