use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{export, operations, project, timeline, upstream};
use crate::AppState;

async fn health() -> &'static str {
    "ok"
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        // Project
        .route("/api/project", get(project::get_project))
        .route("/api/project/setup", post(project::setup_project))
        .route(
            "/api/project/configuration",
            put(project::update_configuration),
        )
        .route("/api/project/personnel", put(project::update_personnel))
        .route(
            "/api/project/completion-type",
            put(project::set_completion_type),
        )
        .route(
            "/api/wells/{well_id}/stages",
            get(project::get_stage_progress),
        )
        // Operations
        .route(
            "/api/operations",
            get(operations::list_operations).post(operations::add_operations),
        )
        .route(
            "/api/operations/quick",
            post(operations::quick_add_operation),
        )
        .route(
            "/api/operations/{id}",
            put(operations::edit_operation).delete(operations::delete_operation),
        )
        .route(
            "/api/operations/{id}/toggle-complete",
            post(operations::toggle_operation_completed),
        )
        // Timeline views
        .route("/api/timeline/feed", get(timeline::get_feed))
        .route("/api/timeline/sectors", get(timeline::get_sectors))
        .route(
            "/api/timeline/sectors/{sector}",
            get(timeline::get_sector_timeline),
        )
        .route("/api/timeline/wells", get(timeline::get_wells))
        .route(
            "/api/timeline/wells/{well_id}",
            get(timeline::get_well_timeline),
        )
        .route("/api/timeline/table", get(timeline::get_table))
        // CSV exports
        .route("/api/export/feed.csv", get(export::export_feed))
        .route("/api/export/table.csv", get(export::export_table))
        .route("/api/export/sectors/{file}", get(export::export_sector))
        .route("/api/export/wells/{file}", get(export::export_well))
        // Upstream passthrough
        .route("/api/upstream/project", get(upstream::get_project))
        .route("/api/upstream/well", get(upstream::get_well))
        .route(
            "/api/upstream/completion-design",
            get(upstream::get_completion_design),
        )
        .route("/api/upstream/stages", get(upstream::get_stages))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
