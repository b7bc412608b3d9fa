#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

use timelog_backend::routes::router;
use timelog_backend::services::oilfield_api::{OilfieldApiConfig, OilfieldApiService};
use timelog_backend::services::operation_store::OperationStore;
use timelog_backend::services::state_repository::JsonFileRepository;
use timelog_backend::AppState;

/// Upstream config pointing at `base_url`; no credentials means every
/// lookup falls back
pub fn upstream_config(base_url: &str, with_credentials: bool) -> OilfieldApiConfig {
    let (client_id, client_secret) = if with_credentials {
        ("test-client".to_string(), "test-secret".to_string())
    } else {
        (String::new(), String::new())
    };

    OilfieldApiConfig {
        base_url: base_url.to_string(),
        token_url: format!("{}/oauth/token", base_url),
        client_id,
        client_secret,
        cache_ttl_secs: 60,
        timeout_secs: 2,
    }
}

/// Router backed by a JSON state file in a temp dir and an offline
/// upstream. The temp dir must outlive the router.
pub struct TestApp {
    pub router: Router,
    pub dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let router = Self::router_for(dir.path().join("state.json")).await;
        Self { router, dir }
    }

    pub fn state_file(&self) -> PathBuf {
        self.dir.path().join("state.json")
    }

    /// Fresh router over an existing state file, as after a restart
    pub async fn router_for(state_file: PathBuf) -> Router {
        let store = OperationStore::load(Arc::new(JsonFileRepository::new(state_file))).await;
        let oilfield_api =
            OilfieldApiService::new(upstream_config("http://127.0.0.1:9", false))
                .expect("Failed to build upstream client");

        router(AppState {
            store: Arc::new(store),
            oilfield_api,
        })
    }

    pub async fn request(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        send_json(&self.router, method, uri, body).await
    }

    pub async fn raw(&self, uri: &str) -> axum::response::Response {
        self.router
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }
}

pub async fn send_json(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, json)
}
