//! In-memory implementation of [`UserStore`].
//!
//! Users live in a `BTreeMap` keyed by id behind a `tokio::sync::RwLock`, so
//! listings come back in id order like the Postgres backend. Not durable:
//! everything is lost when the process exits.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use rolegate_models::{NewUser, Role, User};
use tokio::sync::RwLock;

use crate::store::{StoreError, StoreResult, UserStore};

#[derive(Debug, Default)]
struct Inner {
    users: BTreeMap<i64, User>,
    next_id: i64,
}

#[derive(Debug, Default)]
pub struct MemoryUserStore {
    inner: RwLock<Inner>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store holding `users` as given, ids included. New users get
    /// ids above the largest seeded one.
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let users: BTreeMap<i64, User> = users.into_iter().map(|u| (u.id, u)).collect();
        let next_id = users.keys().next_back().copied().unwrap_or(0);

        Self {
            inner: RwLock::new(Inner { users, next_id }),
        }
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.users.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.users.is_empty()
    }
}

fn not_found(id: i64) -> StoreError {
    StoreError::NotFound(format!("user {}", id))
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn get_by_id(&self, id: i64) -> StoreResult<User> {
        let inner = self.inner.read().await;
        inner.users.get(&id).cloned().ok_or_else(|| not_found(id))
    }

    async fn get_by_email(&self, email: &str) -> StoreResult<User> {
        let inner = self.inner.read().await;
        inner
            .users
            .values()
            .find(|u| u.email == email)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("user with email {}", email)))
    }

    async fn create(&self, user: NewUser) -> StoreResult<User> {
        let mut inner = self.inner.write().await;
        if inner.users.values().any(|u| u.email == user.email) {
            return Err(StoreError::Conflict("email already exists".into()));
        }

        inner.next_id += 1;
        let now = Utc::now();
        let created = User {
            id: inner.next_id,
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
            created_at: now,
            updated_at: now,
        };
        inner.users.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update_role(&self, id: i64, role: Role) -> StoreResult<User> {
        let mut inner = self.inner.write().await;
        let user = inner.users.get_mut(&id).ok_or_else(|| not_found(id))?;
        user.role = role;
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn update_name(&self, id: i64, name: &str) -> StoreResult<User> {
        let mut inner = self.inner.write().await;
        let user = inner.users.get_mut(&id).ok_or_else(|| not_found(id))?;
        user.name = name.to_string();
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        inner.users.remove(&id).map(|_| ()).ok_or_else(|| not_found(id))
    }

    async fn list_by_role(&self, role: Role) -> StoreResult<Vec<User>> {
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .values()
            .filter(|u| u.role == role)
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> StoreResult<Vec<User>> {
        let inner = self.inner.read().await;
        Ok(inner.users.values().cloned().collect())
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
