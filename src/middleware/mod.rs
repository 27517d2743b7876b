//! Request middleware and extractors.
//!
//! - [`auth`]: Bearer token authentication, attaches a [`auth::Principal`]
//! - [`role`]: Allow-list authorization against the attached principal's role
//!
//! Guarded routers stack both as route layers. Axum runs the layer added
//! last first, so `authenticate` goes on after the role check:
//!
//! ```ignore
//! init_roles_router()
//!     .route_layer(middleware::from_fn(require_admin))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), authenticate))
//! ```

pub mod auth;
pub mod role;
