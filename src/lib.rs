// src/lib.rs

use std::sync::Arc;

use services::{oilfield_api::OilfieldApiService, operation_store::OperationStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<OperationStore>,
    pub oilfield_api: OilfieldApiService,
}

pub mod entities;

pub mod services {
    pub mod csv_export;
    pub mod end_time_resolver;
    pub mod oilfield_api;
    pub mod operation_store;
    pub mod project_setup;
    pub mod state_repository;
    pub mod timeline;
}

pub mod config;
pub mod handlers;
pub mod models;
pub mod routes;
