//! Database schema setup

use sqlx::postgres::PgPool;

use crate::domain::DomainError;

/// Create the users table if it does not exist yet.
///
/// Runs at startup when the service is backed by Postgres. Idempotent.
pub async fn run(pool: &PgPool) -> Result<(), DomainError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id BIGSERIAL PRIMARY KEY,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            reset_key TEXT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(|e| DomainError::storage(e.to_string()).in_operation("migrations.run"))?;

    Ok(())
}
