use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use rolegate_auth::verify_token;
use rolegate_core::AppError;
use rolegate_db::StoreError;
use rolegate_models::Role;
use tracing::warn;

use crate::state::AppState;

/// The authenticated caller, attached to request extensions by [`authenticate`].
///
/// `role` is read from the store on every request, so a role change takes
/// effect immediately rather than when the caller's token expires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: i64,
    pub email: String,
    pub role: Role,
}

fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let auth_header = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

    auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::unauthorized("Invalid authorization header format"))
}

/// Resolves the bearer token to a [`Principal`] and stores it on the request.
///
/// Missing or malformed headers, bad tokens and tokens for users that no
/// longer exist are all rejected with 401.
pub async fn authenticate(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let claims = verify_token(bearer_token(&parts)?, &state.jwt_config)?;
    let user_id = claims
        .user_id()
        .ok_or_else(|| AppError::unauthorized("Invalid user ID in token"))?;

    let user = match state.store.get_by_id(user_id).await {
        Ok(user) => user,
        Err(StoreError::NotFound(_)) => {
            warn!(user_id, "Token subject no longer exists");
            return Err(AppError::unauthorized("User no longer exists"));
        }
        Err(err) => return Err(AppError::internal(err)),
    };

    parts.extensions.insert(Principal {
        user_id: user.id,
        email: user.email,
        role: user.role,
    });

    Ok(next.run(Request::from_parts(parts, body)).await)
}

impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .ok_or_else(|| AppError::unauthorized("Not authenticated"))
    }
}
