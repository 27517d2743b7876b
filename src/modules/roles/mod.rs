//! Role management: changing a user's role and listing users by role.
//!
//! Every route here is admin-only; the guard is applied where the router is
//! nested.

pub mod controller;
pub mod error;
pub mod router;
pub mod service;
