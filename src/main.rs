use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use timelog_backend::config::AppConfig;
use timelog_backend::routes::router;
use timelog_backend::services::oilfield_api::OilfieldApiService;
use timelog_backend::services::operation_store::OperationStore;
use timelog_backend::services::state_repository::{
    DbStateRepository, JsonFileRepository, StateRepository,
};
use timelog_backend::AppState;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,timelog_backend=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();

    let repository: Arc<dyn StateRepository> = match &config.database_url {
        Some(database_url) => {
            tracing::info!("Connecting to database...");
            let db = Database::connect(database_url.as_str())
                .await
                .expect("Failed to connect to database");

            tracing::info!("Running migrations...");
            migration::Migrator::up(&db, None)
                .await
                .expect("Failed to run migrations");

            Arc::new(DbStateRepository::new(db))
        }
        None => {
            tracing::info!(
                path = %config.state_file.display(),
                "DATABASE_URL not set - persisting state to a JSON file"
            );
            Arc::new(JsonFileRepository::new(config.state_file.clone()))
        }
    };

    let store = OperationStore::load(repository).await;
    let oilfield_api = OilfieldApiService::new(config.oilfield_api.clone())
        .expect("Failed to build upstream HTTP client");

    let state = AppState {
        store: Arc::new(store),
        oilfield_api,
    };

    let app = router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("Failed to bind listen address");

    tracing::info!(
        "Server listening on {}",
        listener
            .local_addr()
            .map(|addr| addr.to_string())
            .unwrap_or_else(|_| config.bind_addr.clone())
    );

    axum::serve(listener, app).await.expect("Server error");
}
