//! PostgreSQL user repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::user::{ListOrder, NewUser, User, UserRepository};
use crate::domain::DomainError;

/// PostgreSQL implementation of [`UserRepository`].
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_user(row: &PgRow) -> Result<User, DomainError> {
    let id: i64 = get_column(row, "id")?;
    let email: String = get_column(row, "email")?;
    let password_hash: String = get_column(row, "password_hash")?;
    let reset_key: Option<String> = get_column(row, "reset_key")?;
    let created_at: DateTime<Utc> = get_column(row, "created_at")?;
    let updated_at: DateTime<Utc> = get_column(row, "updated_at")?;

    Ok(User::from_storage(
        id,
        email,
        password_hash,
        reset_key,
        created_at,
        updated_at,
    ))
}

fn get_column<'r, T>(row: &'r PgRow, column: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(column)
        .map_err(|e| DomainError::storage(format!("failed to decode column '{}': {}", column, e)))
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn get(&self, id: i64) -> Result<User, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, password_hash, reset_key, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(e.to_string()).in_operation("user.get"))?;

        match row {
            Some(row) => row_to_user(&row),
            None => Err(DomainError::UserNotFound),
        }
    }

    async fn get_by_email(&self, email: &str) -> Result<User, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, password_hash, reset_key, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(e.to_string()).in_operation("user.get_by_email"))?;

        match row {
            Some(row) => row_to_user(&row),
            None => Err(DomainError::UserNotFound),
        }
    }

    async fn create(&self, new_user: NewUser) -> Result<User, DomainError> {
        let row = sqlx::query(
            r#"
            INSERT INTO users (email, password_hash, reset_key, created_at, updated_at)
            VALUES ($1, $2, $3, NOW(), NOW())
            RETURNING id, email, password_hash, reset_key, created_at, updated_at
            "#,
        )
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(&new_user.reset_key)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            let msg = e.to_string();

            if msg.contains("duplicate key") || msg.contains("unique constraint") {
                DomainError::storage(format!("email '{}' already registered", new_user.email))
                    .in_operation("user.create")
            } else {
                DomainError::storage(msg).in_operation("user.create")
            }
        })?;

        row_to_user(&row)
    }

    async fn update_credentials(
        &self,
        id: i64,
        password_hash: &str,
        reset_key: &str,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET password_hash = $2, reset_key = $3, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(password_hash)
        .bind(reset_key)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(e.to_string()).in_operation("user.update_credentials"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::UserNotFound);
        }

        Ok(())
    }

    async fn list(
        &self,
        order: ListOrder,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<User>, DomainError> {
        // Order column and direction come from a closed enum, never from the
        // raw query parameter, so interpolation here is safe.
        let direction = if order.descending { "DESC" } else { "ASC" };
        let sql = format!(
            "SELECT id, email, password_hash, reset_key, created_at, updated_at \
             FROM users ORDER BY {} {} LIMIT $1 OFFSET $2",
            order.field.as_column(),
            direction,
        );

        let rows = sqlx::query(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(e.to_string()).in_operation("user.list"))?;

        rows.iter().map(row_to_user).collect()
    }

    async fn count(&self) -> Result<i64, DomainError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(e.to_string()).in_operation("user.count"))
    }
}
