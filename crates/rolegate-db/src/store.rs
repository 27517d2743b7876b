use async_trait::async_trait;
use rolegate_models::{NewUser, Role, User};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence for user records.
///
/// Implementations must keep `role` inside the closed [`Role`] set. A single
/// call is atomic; sequences of calls are not, and concurrent `update_role`
/// calls on one user resolve as last-write-wins.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get_by_id(&self, id: i64) -> StoreResult<User>;
    async fn get_by_email(&self, email: &str) -> StoreResult<User>;
    async fn create(&self, user: NewUser) -> StoreResult<User>;
    /// Sets `role` and bumps `updated_at`. Fails with `NotFound` for unknown ids.
    async fn update_role(&self, id: i64, role: Role) -> StoreResult<User>;
    /// Renames the user and bumps `updated_at`. Fails with `NotFound` for unknown ids.
    async fn update_name(&self, id: i64, name: &str) -> StoreResult<User>;
    /// Removes the user. Fails with `NotFound` for unknown ids.
    async fn delete(&self, id: i64) -> StoreResult<()>;
    /// Users holding exactly `role`, ordered by id.
    async fn list_by_role(&self, role: Role) -> StoreResult<Vec<User>>;
    /// All users, ordered by id.
    async fn list_all(&self) -> StoreResult<Vec<User>>;

    async fn health_check(&self) -> StoreResult<()>;
    fn backend_name(&self) -> &'static str;
}
