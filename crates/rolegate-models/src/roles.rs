//! The closed role registry.
//!
//! Every user holds exactly one [`Role`]. The set is fixed at compile time;
//! string identifiers are only accepted at the system boundary, through
//! [`Role::from_str`] or [`Role::is_valid`].
//!
//! Capability predicates enumerate the roles they accept explicitly. Roles are
//! ordered by privilege (`admin` ⊇ `moderator` ⊇ `user`), but no predicate
//! derives its answer from that order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// A user's role.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Moderator,
    #[default]
    User,
}

/// Returned when a string is not one of the role identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid role: {0}")]
pub struct ParseRoleError(pub String);

impl Role {
    /// All roles in registry order.
    pub const ALL: [Role; 3] = [Role::Admin, Role::Moderator, Role::User];

    /// Returns the fixed, ordered list of roles.
    pub fn all() -> &'static [Role] {
        &Self::ALL
    }

    /// Returns the role identifiers in registry order.
    pub fn all_identifiers() -> Vec<&'static str> {
        Self::ALL.iter().map(Role::as_str).collect()
    }

    /// True iff `candidate` is exactly one of the identifiers. Case-sensitive.
    pub fn is_valid(candidate: &str) -> bool {
        candidate.parse::<Role>().is_ok()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Moderator => "moderator",
            Role::User => "user",
        }
    }

    pub fn has_admin_access(&self) -> bool {
        matches!(self, Role::Admin)
    }

    pub fn has_moderator_or_higher_access(&self) -> bool {
        matches!(self, Role::Admin | Role::Moderator)
    }

    pub fn can_manage_users(&self) -> bool {
        matches!(self, Role::Admin)
    }

    pub fn can_manage_files(&self) -> bool {
        matches!(self, Role::Admin | Role::Moderator)
    }

    pub fn can_view_all_users(&self) -> bool {
        matches!(self, Role::Admin | Role::Moderator)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "moderator" => Ok(Role::Moderator),
            "user" => Ok(Role::User),
            other => Err(ParseRoleError(other.to_string())),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = ParseRoleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_roles_fixed_order() {
        assert_eq!(Role::all(), &[Role::Admin, Role::Moderator, Role::User]);
        assert_eq!(Role::all_identifiers(), vec!["admin", "moderator", "user"]);
    }

    #[test]
    fn test_is_valid_exact_match_only() {
        assert!(Role::is_valid("admin"));
        assert!(Role::is_valid("moderator"));
        assert!(Role::is_valid("user"));

        for candidate in [
            "",
            "Admin",
            "ADMIN",
            " admin",
            "admin ",
            "superadmin",
            "mod",
            "users",
            "system_admin",
        ] {
            assert!(!Role::is_valid(candidate), "{candidate:?} should be invalid");
        }
    }

    #[test]
    fn test_from_str_round_trips_identifiers() {
        for role in Role::all() {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), *role);
            assert_eq!(role.to_string(), role.as_str());
        }
    }

    #[test]
    fn test_from_str_error_carries_candidate() {
        let err = "root".parse::<Role>().unwrap_err();
        assert_eq!(err, ParseRoleError("root".to_string()));
        assert_eq!(err.to_string(), "invalid role: root");
    }

    #[test]
    fn test_default_is_user() {
        assert_eq!(Role::default(), Role::User);
    }

    #[test]
    fn test_admin_only_predicates() {
        assert!(Role::Admin.has_admin_access());
        assert!(!Role::Moderator.has_admin_access());
        assert!(!Role::User.has_admin_access());

        assert!(Role::Admin.can_manage_users());
        assert!(!Role::Moderator.can_manage_users());
        assert!(!Role::User.can_manage_users());
    }

    #[test]
    fn test_moderator_or_admin_predicates() {
        for role in [Role::Admin, Role::Moderator] {
            assert!(role.has_moderator_or_higher_access());
            assert!(role.can_manage_files());
            assert!(role.can_view_all_users());
        }

        assert!(!Role::User.has_moderator_or_higher_access());
        assert!(!Role::User.can_manage_files());
        assert!(!Role::User.can_view_all_users());
    }

    #[test]
    fn test_serde_uses_lowercase_identifiers() {
        assert_eq!(
            serde_json::to_string(&Role::Moderator).unwrap(),
            r#""moderator""#
        );
        let role: Role = serde_json::from_str(r#""admin""#).unwrap();
        assert_eq!(role, Role::Admin);
        assert!(serde_json::from_str::<Role>(r#""Admin""#).is_err());
    }
}
