//! Role-based authorization middleware.
//!
//! A request passes when the role of its [`Principal`] is listed in the
//! route's allow-list. Matching is exact: an allow-list must name every role
//! it admits, `admin` included. A request with no principal is rejected with
//! 403 just like one with the wrong role.

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use rolegate_core::AppError;
use rolegate_models::Role;
use rolegate_observability::track_authorization_denied;
use thiserror::Error;
use tracing::{debug, warn};

use crate::middleware::auth::Principal;

pub const ADMIN_ONLY: &[Role] = &[Role::Admin];
pub const MODERATOR_OR_ADMIN: &[Role] = &[Role::Admin, Role::Moderator];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccessDenied {
    #[error("Access denied. No authenticated principal")]
    MissingPrincipal,
    #[error("Access denied. Role '{0}' is not allowed")]
    RoleNotAllowed(Role),
}

impl AccessDenied {
    fn reason(&self) -> &'static str {
        match self {
            AccessDenied::MissingPrincipal => "missing_principal",
            AccessDenied::RoleNotAllowed(_) => "role_not_allowed",
        }
    }

    pub fn into_app_error(self) -> AppError {
        AppError::forbidden(self.to_string())
    }
}

/// The authorization decision on its own, with no request involved.
pub fn authorize(role: Option<Role>, allowed: &[Role]) -> Result<Role, AccessDenied> {
    let role = role.ok_or(AccessDenied::MissingPrincipal)?;
    if allowed.contains(&role) {
        Ok(role)
    } else {
        Err(AccessDenied::RoleNotAllowed(role))
    }
}

/// Runs `next` only if the request's principal holds one of `allowed`.
///
/// ```rust,ignore
/// let routes = Router::new()
///     .route("/reports", get(reports))
///     .route_layer(middleware::from_fn(|req, next| {
///         require_roles(req, next, &[Role::Admin, Role::Moderator])
///     }));
/// ```
pub async fn require_roles(req: Request, next: Next, allowed: &'static [Role]) -> Response {
    let principal = req.extensions().get::<Principal>();
    let user_id = principal.map(|p| p.user_id);

    match authorize(principal.map(|p| p.role), allowed) {
        Ok(role) => {
            debug!(user_id, role = %role, "Access granted");
            next.run(req).await
        }
        Err(denied) => {
            warn!(
                user_id,
                path = %req.uri().path(),
                reason = denied.reason(),
                "Access denied"
            );
            track_authorization_denied(denied.reason());
            denied.into_app_error().into_response()
        }
    }
}

pub async fn require_admin(req: Request, next: Next) -> Response {
    require_roles(req, next, ADMIN_ONLY).await
}

pub async fn require_moderator_or_admin(req: Request, next: Next) -> Response {
    require_roles(req, next, MODERATOR_OR_ADMIN).await
}
