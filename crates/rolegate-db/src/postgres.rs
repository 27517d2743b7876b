//! PostgreSQL implementation of [`UserStore`].
//!
//! The `users.role` column is `TEXT` with a `CHECK` constraint on the three
//! identifiers; rows are parsed back into [`Role`] on read, and a value
//! outside the set surfaces as [`StoreError::Unexpected`].

use std::time::Duration;

use anyhow::{Context, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rolegate_models::{NewUser, Role, User};
use sqlx::postgres::PgPoolOptions;
use sqlx::{FromRow, PgPool};
use tracing::instrument;

use crate::config::DatabaseConfig;
use crate::store::{StoreError, StoreResult, UserStore};

const USER_COLUMNS: &str = "id, name, email, password_hash, role, created_at, updated_at";

/// Opens a connection pool from `config.url`.
pub async fn init_db_pool(config: &DatabaseConfig) -> anyhow::Result<PgPool> {
    let database_url = config
        .url
        .as_deref()
        .context("DATABASE_URL must be set for the postgres store backend")?;

    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
        .context("Failed to connect to database")
}

/// Applies the SQL migrations shipped in `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .context("Failed to run database migrations")
}

#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Row shape of the `users` table.
#[derive(Debug, Clone, FromRow)]
struct DbUser {
    id: i64,
    name: String,
    email: String,
    password_hash: String,
    role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<DbUser> for User {
    type Error = StoreError;

    fn try_from(row: DbUser) -> Result<Self, Self::Error> {
        let role = row
            .role
            .parse::<Role>()
            .map_err(|e| anyhow!("user {} has {}", row.id, e))?;

        Ok(User {
            id: row.id,
            name: row.name,
            email: row.email,
            password_hash: row.password_hash,
            role,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn users_from_rows(rows: Vec<DbUser>) -> StoreResult<Vec<User>> {
    rows.into_iter().map(User::try_from).collect()
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::NotFound("row not found".into()),
            err if is_unique_violation(&err) => StoreError::Conflict(err.to_string()),
            err => StoreError::Unexpected(err.into()),
        }
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    if let sqlx::Error::Database(db_err) = err {
        return db_err.code().map(|code| code == "23505").unwrap_or(false);
    }
    false
}

#[async_trait]
impl UserStore for PgUserStore {
    #[instrument(skip(self))]
    async fn get_by_id(&self, id: i64) -> StoreResult<User> {
        let row = sqlx::query_as::<_, DbUser>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("user {}", id)))?;

        row.try_into()
    }

    #[instrument(skip(self))]
    async fn get_by_email(&self, email: &str) -> StoreResult<User> {
        let row = sqlx::query_as::<_, DbUser>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("user with email {}", email)))?;

        row.try_into()
    }

    #[instrument(skip(self, user), fields(email = %user.email, role = %user.role))]
    async fn create(&self, user: NewUser) -> StoreResult<User> {
        let row = sqlx::query_as::<_, DbUser>(&format!(
            "INSERT INTO users (name, email, password_hash, role)
             VALUES ($1, $2, $3, $4)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    #[instrument(skip(self))]
    async fn update_role(&self, id: i64, role: Role) -> StoreResult<User> {
        let row = sqlx::query_as::<_, DbUser>(&format!(
            "UPDATE users SET role = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(role.as_str())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("user {}", id)))?;

        row.try_into()
    }

    #[instrument(skip(self))]
    async fn update_name(&self, id: i64, name: &str) -> StoreResult<User> {
        let row = sqlx::query_as::<_, DbUser>(&format!(
            "UPDATE users SET name = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("user {}", id)))?;

        row.try_into()
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("user {}", id)));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_by_role(&self, role: Role) -> StoreResult<Vec<User>> {
        let rows = sqlx::query_as::<_, DbUser>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE role = $1 ORDER BY id"
        ))
        .bind(role.as_str())
        .fetch_all(&self.pool)
        .await?;

        users_from_rows(rows)
    }

    #[instrument(skip(self))]
    async fn list_all(&self) -> StoreResult<Vec<User>> {
        let rows = sqlx::query_as::<_, DbUser>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        users_from_rows(rows)
    }

    async fn health_check(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}
