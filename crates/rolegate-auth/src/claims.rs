//! JWT claim structures for access and refresh tokens.

use rolegate_models::Role;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// JWT claims for access tokens.
///
/// `role` records the role held when the token was issued. Authorization
/// reads the current role from the user store instead, so a role change takes
/// effect on the next request without re-issuing tokens.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: String,
    /// User's email address
    pub email: String,
    /// Role at issue time
    pub role: Role,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
}

impl Claims {
    /// The numeric user id carried in `sub`, if it is one.
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}

/// JWT claims for refresh tokens.
///
/// Carries no role, so a refresh token never passes as an access token, and
/// requires `jti`, so an access token never passes as a refresh token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RefreshTokenClaims {
    /// User ID (subject claim)
    pub sub: String,
    pub email: String,
    pub exp: usize,
    pub iat: usize,
    /// Unique token id, so two refreshes in the same second differ
    pub jti: String,
}

impl RefreshTokenClaims {
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}
