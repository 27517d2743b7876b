//! Administrative operations behind `rolegate-cli`.
//!
//! These run against a [`UserStore`] directly, bypassing HTTP, so they work
//! before any admin account exists.

pub mod seeder;

use anyhow::{Context, anyhow, bail};
use rolegate_core::hash_password;
use rolegate_db::{StoreError, UserStore};
use rolegate_models::{NewUser, Role, UserResponse};

use crate::modules::roles::service::RoleService;

pub async fn create_admin(
    store: &dyn UserStore,
    name: &str,
    email: &str,
    password: &str,
) -> anyhow::Result<UserResponse> {
    if password.len() < 8 {
        bail!("Password must be at least 8 characters");
    }

    let password_hash = hash_password(password).map_err(|e| e.error)?;

    let user = store
        .create(NewUser {
            name: name.to_string(),
            email: email.to_string(),
            password_hash,
            role: Role::Admin,
        })
        .await
        .map_err(|e| match e {
            StoreError::Conflict(_) => anyhow!("User with this email already exists"),
            other => anyhow::Error::new(other).context("Failed to create admin"),
        })?;

    Ok(user.into())
}

/// Same rules as `PUT /roles/users/{id}/role`, without the HTTP layer.
pub async fn set_role(
    store: &dyn UserStore,
    user_id: i64,
    role: &str,
) -> anyhow::Result<UserResponse> {
    RoleService::update_user_role(store, user_id, role)
        .await
        .with_context(|| format!("Failed to set role of user {}", user_id))
}
