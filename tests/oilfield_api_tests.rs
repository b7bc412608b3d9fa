mod common;

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    routing::{get, post},
    Form, Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use timelog_backend::services::oilfield_api::{GatewayError, OilfieldApiService};
use timelog_backend::services::project_setup::import_project;

use crate::common::upstream_config;

const TOKEN: &str = "fake-token";

#[derive(Default)]
struct Hits {
    token: AtomicUsize,
    project: AtomicUsize,
    well: AtomicUsize,
    design: AtomicUsize,
}

type Params = Query<HashMap<String, String>>;

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {}", TOKEN))
}

async fn token(
    State(hits): State<Arc<Hits>>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> Result<Json<Value>, StatusCode> {
    hits.token.fetch_add(1, Ordering::SeqCst);
    let basic = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("Basic "));
    if !basic || form.get("grant_type").map(String::as_str) != Some("client_credentials") {
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(Json(json!({
        "access_token": TOKEN,
        "token_type": "bearer",
        "expires_in": 3600
    })))
}

async fn project(
    State(hits): State<Arc<Hits>>,
    headers: HeaderMap,
    Query(params): Params,
) -> Result<Json<Value>, StatusCode> {
    hits.project.fetch_add(1, Ordering::SeqCst);
    if !authorized(&headers) {
        return Err(StatusCode::UNAUTHORIZED);
    }
    match params.get("project_number").map(String::as_str) {
        Some("P-100") => Ok(Json(json!([{
            "padName": "Eagle Pad",
            "projectNumber": "P-100",
            "basin": "Permian",
            "numberOfWells": 2,
            "wellIDs": [{"id": "W-1"}, {"id": "W-broken"}],
            "crews": [{"label": "Red Crew"}]
        }]))),
        Some("P-sparse") => Ok(Json(json!([{
            "padName": "Sparse Pad",
            "projectNumber": "P-sparse",
            "basin": null,
            "numberOfWells": null,
            "groundLevelEleation": null,
            "wellIDs": [{"id": "W-1"}],
            "crews": null
        }]))),
        Some("P-empty") => Ok(Json(json!([{
            "padName": "Empty Pad",
            "projectNumber": "P-empty",
            "wellIDs": []
        }]))),
        _ => Ok(Json(json!([]))),
    }
}

async fn well(
    State(hits): State<Arc<Hits>>,
    headers: HeaderMap,
    Query(params): Params,
) -> Result<Json<Value>, StatusCode> {
    hits.well.fetch_add(1, Ordering::SeqCst);
    if !authorized(&headers) {
        return Err(StatusCode::UNAUTHORIZED);
    }
    match params.get("well_id").map(String::as_str) {
        Some("W-1") => Ok(Json(json!([{
            "wellName": "Eagle 1H",
            "apiNumber": "42-001",
            "afeNumber": null,
            "color": null,
            "bidPrice": null
        }]))),
        _ => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

async fn design(
    State(hits): State<Arc<Hits>>,
    headers: HeaderMap,
    Query(params): Params,
) -> Result<Json<Value>, StatusCode> {
    hits.design.fetch_add(1, Ordering::SeqCst);
    if !authorized(&headers) {
        return Err(StatusCode::UNAUTHORIZED);
    }
    match params.get("well_id").map(String::as_str) {
        Some("W-1") => Ok(Json(json!([{"plannedNumberOfStages": 40}]))),
        // Malformed body
        _ => Ok(Json(json!({"unexpected": true}))),
    }
}

/// Serve a fake upstream on an ephemeral port and return its base URL
async fn spawn_upstream(hits: Arc<Hits>) -> String {
    let app = Router::new()
        .route("/oauth/token", post(token))
        .route("/v1/project/", get(project))
        .route("/v1/generalWellInformation", get(well))
        .route("/v1/completionDesign", get(design))
        .with_state(hits);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

async fn service() -> (OilfieldApiService, Arc<Hits>) {
    let hits = Arc::new(Hits::default());
    let base_url = spawn_upstream(hits.clone()).await;
    let api = OilfieldApiService::new(upstream_config(&base_url, true)).unwrap();
    (api, hits)
}

#[tokio::test]
async fn test_project_lookup_uses_first_record() {
    let (api, _hits) = service().await;
    let project = api.try_project_by_number("P-100").await.unwrap();

    assert_eq!(project.pad_name, "Eagle Pad");
    assert_eq!(project.well_ids.len(), 2);
    assert_eq!(project.crews[0].label, "Red Crew");
}

#[tokio::test]
async fn test_token_is_reused_across_calls() {
    let (api, hits) = service().await;

    api.try_project_by_number("P-100").await.unwrap();
    api.try_well_info("W-1").await.unwrap();
    api.try_completion_design("W-1").await.unwrap();

    assert_eq!(hits.token.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_successful_well_lookups_are_cached() {
    let (api, hits) = service().await;

    let first = api.get_well_info("W-1").await;
    let second = api.get_well_info("W-1").await;
    assert_eq!(first.well_name, "Eagle 1H");
    assert_eq!(first, second);
    assert_eq!(hits.well.load(Ordering::SeqCst), 1);

    api.get_completion_design("W-1").await;
    api.get_completion_design("W-1").await;
    assert_eq!(hits.design.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_failures_fall_back_and_are_not_cached() {
    let (api, hits) = service().await;

    assert!(matches!(
        api.try_well_info("W-broken").await,
        Err(GatewayError::Status { .. })
    ));
    let info = api.get_well_info("W-broken").await;
    assert_eq!(info.well_name, "Well W-broken");
    assert_eq!(info.api_number, "API-W-broken");
    assert_eq!(hits.well.load(Ordering::SeqCst), 2);

    assert!(matches!(
        api.try_completion_design("W-broken").await,
        Err(GatewayError::Decode(_))
    ));
    assert_eq!(
        api.get_completion_design("W-broken")
            .await
            .planned_number_of_stages,
        26
    );

    assert!(matches!(
        api.try_project_by_number("P-missing").await,
        Err(GatewayError::Empty)
    ));
    assert_eq!(
        api.get_project_by_number("P-missing").await.pad_name,
        "Project P-missing"
    );
}

#[tokio::test]
async fn test_unreachable_upstream_falls_back() {
    // Bind then drop to get a port nobody listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = OilfieldApiService::new(upstream_config(&format!("http://{}", addr), true)).unwrap();
    assert!(matches!(
        api.try_project_by_number("P-1").await,
        Err(GatewayError::Transport(_))
    ));
    assert_eq!(api.get_project_by_number("P-1").await.well_ids.len(), 5);
}

#[tokio::test]
async fn test_stages_follow_completion_design() {
    let (api, _hits) = service().await;
    let stages = api.stages_for_well("W-1").await;

    assert_eq!(stages.len(), 41);
    assert_eq!(stages[40].id, "W-1-stage-40");
}

#[tokio::test]
async fn test_import_project_fans_out_per_well() {
    let (api, hits) = service().await;
    let setup = import_project(&api, "P-100").await;

    assert_eq!(setup.project.name, "Eagle Pad");
    assert_eq!(setup.project.basin, "Permian");
    assert_eq!(setup.project.crew.as_deref(), Some("Red Crew"));

    assert_eq!(setup.wells.len(), 2);
    assert_eq!(setup.wells[0].name, "Eagle 1H");
    assert_eq!(setup.wells[0].planned_number_of_stages, Some(40));
    // Failures are isolated to the broken well
    assert_eq!(setup.wells[1].name, "Well W-broken");
    assert_eq!(setup.wells[1].planned_number_of_stages, Some(26));

    assert_eq!(hits.well.load(Ordering::SeqCst), 2);
    assert_eq!(hits.design.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_import_project_without_wells_uses_development_wells() {
    let (api, _hits) = service().await;
    let setup = import_project(&api, "P-empty").await;

    assert_eq!(setup.project.name, "Project P-empty");
    assert_eq!(setup.project.crew.as_deref(), Some("Mock Crew"));
    let names: Vec<&str> = setup.wells.iter().map(|w| w.name.as_str()).collect();
    assert_eq!(names, vec!["Well Alpha-1", "Well Alpha-2", "Well Beta-1"]);
}

#[tokio::test]
async fn test_null_attributes_keep_the_real_project() {
    let (api, _hits) = service().await;
    let setup = import_project(&api, "P-sparse").await;

    assert_eq!(setup.project.name, "Sparse Pad");
    assert_eq!(setup.project.basin, "Development Basin");
    assert_eq!(setup.wells.len(), 1);
    assert_eq!(setup.wells[0].id, "W-1");
    assert_eq!(setup.wells[0].name, "Eagle 1H");
}
