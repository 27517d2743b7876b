//! # Rolegate Core
//!
//! Core types shared by every Rolegate crate.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`password`]: bcrypt password hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use rolegate_core::errors::AppError;
//! use rolegate_core::password::{hash_password, verify_password};
//!
//! let error = AppError::not_found(anyhow::anyhow!("User not found"));
//! let hash = hash_password("secure_password")?;
//! ```

pub mod errors;
pub mod password;

pub use errors::AppError;
pub use password::{hash_password, verify_password};
