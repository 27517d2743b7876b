//! # Rolegate Models
//!
//! The closed role registry and the data structures exchanged between the
//! Rolegate services, the user store and HTTP clients.
//!
//! # Modules
//!
//! - [`roles`]: The [`Role`] enum, registry lookups and capability predicates
//! - [`users`]: User entity, public projection and role-management DTOs
//! - [`auth`]: Login, refresh and registration DTOs
//!
//! # Example
//!
//! ```ignore
//! use rolegate_models::Role;
//!
//! assert!(Role::is_valid("moderator"));
//! assert!(Role::Moderator.can_view_all_users());
//! assert!(!Role::Moderator.can_manage_users());
//! ```

pub mod auth;
pub mod roles;
pub mod users;

pub use auth::{LoginRequest, LoginResponse, RefreshTokenRequest, RegisterRequest};
pub use roles::{ParseRoleError, Role};
pub use users::{
    AvailableRolesResponse, CreateUserDto, NewUser, UpdateUserDto, UpdateUserRoleDto, User,
    UserResponse, UsersByRoleQuery,
};
