//! FileShare Server: upload, list and share files.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use fileshare_api::AppState;
use fileshare_core::config::{AppConfig, DatabaseBackend};
use fileshare_core::error::AppError;
use fileshare_core::traits::storage::StorageProvider;
use fileshare_database::{DatabasePool, MemoryStore, Stores};
use fileshare_storage::LocalStorageProvider;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from `config/` and the environment.
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("FILESHARE_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting FileShare v{}", env!("CARGO_PKG_VERSION"));

    let (stores, pool) = open_stores(&config).await?;

    tracing::info!(root = %config.storage.root_path, "Initializing blob storage...");
    let storage: Arc<dyn StorageProvider> =
        Arc::new(LocalStorageProvider::new(&config.storage.root_path).await?);

    let state = AppState::new(config, stores, storage);
    let result = fileshare_api::run_server(state).await;

    if let Some(pool) = pool {
        pool.close().await;
    }
    result
}

/// Build the entity stores for the configured backend.
async fn open_stores(config: &AppConfig) -> Result<(Stores, Option<DatabasePool>), AppError> {
    match config.database.backend {
        DatabaseBackend::Memory => {
            tracing::warn!("Using in-memory store; data is lost on restart");
            Ok((MemoryStore::new().stores(), None))
        }
        DatabaseBackend::Postgres => {
            tracing::info!("Connecting to database...");
            let pool = DatabasePool::connect(&config.database).await?;

            if config.database.run_migrations {
                tracing::info!("Running database migrations...");
                fileshare_database::migration::run_migrations(pool.pool()).await?;
                tracing::info!("Database migrations complete");
            }

            Ok((pool.stores(), Some(pool)))
        }
    }
}
