//! User Account Service
//!
//! A small user-account microservice: registration, login, password reset
//! and change, and a paginated user list, served over HTTP with a uniform
//! JSON envelope.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};

use api::state::AppState;
use domain::user::UserRepository;
use infrastructure::user::{Argon2Hasher, InMemoryUserRepository, PostgresUserRepository, UserService};

/// Create the application state from configuration.
///
/// Uses Postgres when `database.url` is configured (running the schema
/// setup first), otherwise an in-memory repository.
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let repository: Arc<dyn UserRepository> = match &config.database.url {
        Some(url) => {
            let pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .acquire_timeout(Duration::from_secs(config.database.connect_timeout_secs))
                .connect(url)
                .await?;

            infrastructure::migrations::run(&pool).await?;
            info!("Connected to Postgres");

            Arc::new(PostgresUserRepository::new(pool))
        }
        None => {
            warn!("No database.url configured, using in-memory storage");
            Arc::new(InMemoryUserRepository::new())
        }
    };

    let service = UserService::new(repository, Arc::new(Argon2Hasher::new()));

    Ok(AppState::new(Arc::new(service)))
}
