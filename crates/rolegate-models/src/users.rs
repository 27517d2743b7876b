//! User models and role-management DTOs.
//!
//! # Core Types
//!
//! - [`User`] - Stored user, including the password hash
//! - [`UserResponse`] - Public projection returned to clients
//! - [`NewUser`] - Input for creating a user in the store
//!
//! # Request / Response DTOs
//!
//! - [`CreateUserDto`] - Body of `POST /users`
//! - [`UpdateUserDto`] - Body of `PUT /users/{id}`
//! - [`UpdateUserRoleDto`] - Body of `PUT /roles/users/{id}/role`
//! - [`UsersByRoleQuery`] - Query of `GET /roles/users`
//! - [`AvailableRolesResponse`] - Body of `GET /roles/available`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::roles::Role;

/// A user as held by the store.
///
/// Never serialized directly; convert to [`UserResponse`] before it leaves
/// the service layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public view of a user. The password hash is never part of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Fields needed to insert a user. Timestamps and id are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

/// Admin-created account. `role` defaults to `user` when omitted and, like
/// [`UpdateUserRoleDto::role`], is checked against the registry by the service.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUserDto {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
    #[schema(example = "moderator")]
    pub role: Option<String>,
}

/// Profile edit. Roles are changed through the role endpoints only.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateUserDto {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
}

/// Body of a role change request.
///
/// `role` stays a string here; membership in the role set is checked by the
/// role service so that an unknown role is reported as such.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRoleDto {
    #[validate(length(min = 1, message = "role is required"))]
    #[schema(example = "moderator")]
    pub role: String,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct UsersByRoleQuery {
    /// One of `admin`, `moderator`, `user`
    pub role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AvailableRolesResponse {
    pub roles: Vec<Role>,
}

impl AvailableRolesResponse {
    pub fn all() -> Self {
        Self {
            roles: Role::all().to_vec(),
        }
    }
}
