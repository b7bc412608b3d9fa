mod common;

use axum::http::{header, StatusCode};
use serde_json::{json, Value};

use crate::common::{send_json, TestApp};

const T0: &str = "2025-03-01T08:00:00Z";
const T5: &str = "2025-03-01T08:05:00Z";
const T10: &str = "2025-03-01T08:10:00Z";

async fn setup(app: &TestApp) -> Value {
    let (status, body) = app
        .request("POST", "/api/project/setup", Some(json!({"number": "P-7"})))
        .await;
    assert_eq!(status, StatusCode::OK);
    body
}

async fn add(app: &TestApp, well: &str, sector: &str, start: &str) -> String {
    let (status, body) = app
        .request(
            "POST",
            "/api/operations",
            Some(json!({
                "startTime": start,
                "operations": [{"wellId": well, "type": "PUMP", "sector": sector}]
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "add failed: {}", body);
    body["operations"][0]["id"].as_str().unwrap().to_string()
}

async fn end_time_of(app: &TestApp, id: &str) -> Option<String> {
    let (_, body) = app.request("GET", "/api/operations", None).await;
    body["operations"]
        .as_array()
        .unwrap()
        .iter()
        .find(|op| op["id"] == id)
        .and_then(|op| op["endTime"].as_str())
        .map(|s| s.to_string())
}

fn same_instant(actual: Option<String>, expected: &str) -> bool {
    let expected = chrono::DateTime::parse_from_rfc3339(expected).unwrap();
    actual
        .and_then(|s| chrono::DateTime::parse_from_rfc3339(&s).ok())
        .is_some_and(|t| t == expected)
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;
    let response = app.raw("/health").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_setup_uses_fallback_project_when_upstream_is_unavailable() {
    let app = TestApp::new().await;
    let body = setup(&app).await;

    assert_eq!(body["project"]["number"], "P-7");
    assert_eq!(body["project"]["name"], "Project P-7");
    assert_eq!(body["wells"].as_array().unwrap().len(), 5);
    assert_eq!(body["wells"][0]["name"], "Well well-1");
    assert_eq!(body["operationCount"], 0);
}

#[tokio::test]
async fn test_setup_requires_number() {
    let app = TestApp::new().await;
    let (status, body) = app
        .request("POST", "/api/project/setup", Some(json!({"number": "  "})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_add_before_setup_conflicts() {
    let app = TestApp::new().await;
    let (status, _) = app
        .request(
            "POST",
            "/api/operations",
            Some(json!({"operations": [{"wellId": "well-1", "type": "PUMP", "sector": "A"}]})),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

/// Same-sector chain closed by PAD, then edited and pruned through the API
#[tokio::test]
async fn test_end_times_follow_every_mutation() {
    let app = TestApp::new().await;
    setup(&app).await;

    let op0 = add(&app, "well-1", "A", T0).await;
    let op1 = add(&app, "well-2", "A", T5).await;
    let op2 = add(&app, "well-1", "PAD", T10).await;

    assert!(same_instant(end_time_of(&app, &op0).await, T5));
    assert!(same_instant(end_time_of(&app, &op1).await, T10));
    assert_eq!(end_time_of(&app, &op2).await, None);

    let (status, edited) = app
        .request(
            "PUT",
            &format!("/api/operations/{}", op2),
            Some(json!({"wellId": "well-1", "type": "PUMP", "sector": "B"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(edited["sector"], "B");
    assert!(same_instant(edited["startTime"].as_str().map(String::from), T10));
    assert!(same_instant(end_time_of(&app, &op0).await, T5));
    assert_eq!(end_time_of(&app, &op1).await, None);

    let (status, _) = app
        .request("DELETE", &format!("/api/operations/{}", op1), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(end_time_of(&app, &op0).await, None);
}

#[tokio::test]
async fn test_invalid_batch_is_rejected_whole() {
    let app = TestApp::new().await;
    setup(&app).await;

    let (status, body) = app
        .request(
            "POST",
            "/api/operations",
            Some(json!({
                "startTime": T0,
                "operations": [
                    {"wellId": "well-1", "type": "PUMP", "sector": "A"},
                    {"wellId": "well-2", "type": "PUMP"}
                ]
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("sector"));

    let (_, list) = app.request("GET", "/api/operations", None).await;
    assert_eq!(list["total"], 0);
}

#[tokio::test]
async fn test_unknown_operation_is_not_found() {
    let app = TestApp::new().await;
    setup(&app).await;

    let (status, _) = app
        .request("POST", "/api/operations/nope/toggle-complete", None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_quick_add_and_toggle() {
    let app = TestApp::new().await;
    setup(&app).await;

    let (status, op) = app
        .request(
            "POST",
            "/api/operations/quick",
            Some(json!({"preset": "well-swap"})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(op["type"], "NP");
    assert_eq!(op["sector"], "PAD");
    assert_eq!(op["mainEvent"], "Well Swap (Zippering)");
    assert_eq!(op["wellId"], "well-1");

    let id = op["id"].as_str().unwrap();
    let (status, toggled) = app
        .request("POST", &format!("/api/operations/{}/toggle-complete", id), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(toggled["completed"], true);
}

#[tokio::test]
async fn test_list_filters_by_well() {
    let app = TestApp::new().await;
    setup(&app).await;
    add(&app, "well-1", "A", T0).await;
    add(&app, "well-2", "B", T5).await;

    let (_, body) = app
        .request("GET", "/api/operations?well_id=well-2", None)
        .await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["operations"][0]["wellId"], "well-2");
}

#[tokio::test]
async fn test_timeline_views() {
    let app = TestApp::new().await;
    setup(&app).await;
    add(&app, "well-2", "WireLine", T0).await;
    add(&app, "well-1", "A", T5).await;
    add(&app, "well-1", "PAD", T10).await;

    let (_, feed) = app.request("GET", "/api/timeline/feed", None).await;
    assert_eq!(feed["total"], 3);
    assert_eq!(feed["groups"][0]["operations"][0]["sector"], "PAD");

    let (_, sectors) = app.request("GET", "/api/timeline/sectors", None).await;
    assert_eq!(sectors["sectors"], json!(["A", "WireLine"]));

    let (_, sector) = app
        .request("GET", "/api/timeline/sectors/wireline", None)
        .await;
    assert_eq!(sector["groups"].as_array().unwrap().len(), 2);

    let (status, _) = app
        .request("GET", "/api/timeline/sectors/Basement", None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, wells) = app.request("GET", "/api/timeline/wells", None).await;
    assert_eq!(wells["wells"][0]["id"], "well-2");

    let (_, well) = app
        .request("GET", "/api/timeline/wells/well-1", None)
        .await;
    assert_eq!(well["wellName"], "Well well-1");
    assert_eq!(well["groups"].as_array().unwrap().len(), 2);

    let (_, table) = app.request("GET", "/api/timeline/table", None).await;
    assert_eq!(table["rows"].as_array().unwrap().len(), 3);
    assert_eq!(table["rows"][2]["minutes"], 10);
}

#[tokio::test]
async fn test_stage_progress() {
    let app = TestApp::new().await;
    setup(&app).await;

    let (status, _) = app
        .request(
            "POST",
            "/api/operations",
            Some(json!({
                "startTime": T0,
                "operations": [{"wellId": "well-3", "type": "PUMP", "sector": "A", "stage": 2, "completed": true}]
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, progress) = app
        .request("GET", "/api/wells/well-3/stages", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(progress["plannedNumberOfStages"], 26);
    assert_eq!(progress["stages"][1]["isCompleted"], true);
    assert_eq!(progress["stages"][0]["isCompleted"], false);

    let (status, _) = app.request("GET", "/api/wells/ghost/stages", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_personnel_must_come_from_roster() {
    let app = TestApp::new().await;
    let project = setup(&app).await;

    let mut configuration = project["configuration"].clone();
    configuration["personnel"]["engineers"] = json!(["Dana"]);
    let (status, _) = app
        .request("PUT", "/api/project/configuration", Some(configuration))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .request(
            "PUT",
            "/api/project/personnel",
            Some(json!({"engineer": "Robin"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .request(
            "PUT",
            "/api/project/personnel",
            Some(json!({"engineer": "Dana"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .request(
            "PUT",
            "/api/project/completion-type",
            Some(json!({"completionType": "Zipper - 1 WL log"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["completionType"], "Zipper - 1 WL log");

    let id = add(&app, "well-1", "C", T0).await;
    let (_, list) = app.request("GET", "/api/operations", None).await;
    let op = list["operations"]
        .as_array()
        .unwrap()
        .iter()
        .find(|op| op["id"] == id.as_str())
        .unwrap()
        .clone();
    assert_eq!(op["personnel"]["engineer"], "Dana");
    assert_eq!(op["completionType"], "Zipper - 1 WL log");
}

#[tokio::test]
async fn test_csv_exports() {
    let app = TestApp::new().await;
    setup(&app).await;
    add(&app, "well-1", "A", T0).await;
    add(&app, "well-1", "A", T5).await;

    let response = app.raw("/api/export/feed.csv").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"sacred-timeline.csv\""
    );
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].ends_with("\"Ongoing\""));
    assert!(lines[2].ends_with(",0.08"));

    let response = app.raw("/api/export/sectors/A.csv").await;
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"A-timeline.csv\""
    );

    let response = app.raw("/api/export/wells/well-1.csv").await;
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"Well well-1-timeline.csv\""
    );

    let response = app.raw("/api/export/wells/ghost.csv").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.raw("/api/export/table.csv").await;
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.starts_with("Engineer,Pump Operator,Supervisor,Customer Rep,Type"));
    assert!(text.contains("\"5\""));
}

#[tokio::test]
async fn test_upstream_passthrough_validates_query() {
    let app = TestApp::new().await;

    let (status, _) = app.request("GET", "/api/upstream/project", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .request("GET", "/api/upstream/well?well_id=W-9", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["apiNumber"], "API-W-9");

    let (status, body) = app
        .request("GET", "/api/upstream/completion-design?well_id=W-9", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["plannedNumberOfStages"], 26);

    let (_, stages) = app
        .request("GET", "/api/upstream/stages?well_id=W-9", None)
        .await;
    assert_eq!(stages.as_array().unwrap().len(), 27);
}

#[tokio::test]
async fn test_state_survives_restart() {
    let app = TestApp::new().await;
    setup(&app).await;
    let id = add(&app, "well-1", "A", T0).await;
    add(&app, "well-1", "A", T5).await;

    let restarted = TestApp::router_for(app.state_file()).await;
    let (status, body) = send_json(&restarted, "GET", "/api/operations", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);

    let first = body["operations"]
        .as_array()
        .unwrap()
        .iter()
        .find(|op| op["id"] == id.as_str())
        .unwrap();
    assert!(same_instant(first["endTime"].as_str().map(String::from), T5));
}

#[tokio::test]
async fn test_corrupt_state_file_starts_fresh() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    std::fs::write(&path, "{ not json").unwrap();

    let router = TestApp::router_for(path).await;
    let (status, body) = send_json(&router, "GET", "/api/project", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["project"].is_null());
}
