//! # Rolegate Auth
//!
//! JWT access and refresh tokens for the Rolegate API.
//!
//! - [`claims`]: The access and refresh token claim sets
//! - [`jwt`]: Token creation and verification
//!
//! # Example
//!
//! ```ignore
//! use rolegate_auth::{create_access_token, verify_token};
//! use rolegate_config::JwtConfig;
//! use rolegate_models::Role;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(42, "user@example.com", Role::User, &config)?;
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.user_id(), Some(42));
//! ```

pub mod claims;
pub mod jwt;

pub use claims::{Claims, RefreshTokenClaims};
pub use jwt::{create_access_token, create_refresh_token, verify_refresh_token, verify_token};
