//! Tessera API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod dto;
mod error;
mod extract;
mod handlers;
mod state;

use sqlx::postgres::PgPoolOptions;
use tessera_core::AppError;
use tracing::info;

use crate::api_config::{ApiConfig, StorageBackend, init_tracing};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::load()?;

    let app_state = match (config.storage_backend, config.database_url.as_deref()) {
        (StorageBackend::Postgres, Some(database_url)) => {
            let pool = PgPoolOptions::new()
                .max_connections(config.database_max_connections)
                .connect(database_url)
                .await
                .map_err(|error| {
                    AppError::Internal(format!("failed to connect to database: {error}"))
                })?;

            sqlx::migrate!("../../crates/infrastructure/migrations")
                .run(&pool)
                .await
                .map_err(|error| AppError::Internal(format!("failed to run migrations: {error}")))?;

            if config.migrate_only {
                info!("database migrations applied successfully");
                return Ok(());
            }

            AppState::postgres(pool)
        }
        (StorageBackend::Postgres, None) => {
            return Err(AppError::Validation("DATABASE_URL is required".to_owned()));
        }
        (StorageBackend::Memory, _) => {
            info!("using in-memory storage; grants are lost on restart");
            AppState::in_memory()
        }
    };

    let app = api_router::build_router(app_state);

    let address = config.socket_address()?;
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind API listener: {error}")))?;

    info!(%address, "tessera-api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))
}
