use anyhow::anyhow;
use axum::{Json, extract::State};
use rolegate_core::AppError;
use rolegate_models::{AvailableRolesResponse, UpdateUserRoleDto, UserResponse, UsersByRoleQuery};
use tracing::instrument;

use crate::middleware::auth::Principal;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedPath, ValidatedQuery};

use super::error::RoleServiceError;
use super::service::RoleService;

fn parse_user_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .map_err(|_| AppError::bad_request(anyhow!("Invalid user ID '{}'", raw)))
}

/// Change a user's role
#[utoipa::path(
    put,
    path = "/api/v1/roles/users/{id}/role",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    request_body = UpdateUserRoleDto,
    responses(
        (status = 200, description = "Role updated", body = UserResponse),
        (status = 400, description = "Invalid ID, invalid role, or role unchanged", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 500, description = "User not found or internal error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Roles"
)]
#[instrument(skip(state, principal, dto), fields(actor_id = principal.user_id))]
pub async fn update_user_role(
    State(state): State<AppState>,
    principal: Principal,
    ValidatedPath(id): ValidatedPath<String>,
    ValidatedJson(dto): ValidatedJson<UpdateUserRoleDto>,
) -> Result<Json<UserResponse>, AppError> {
    let user_id = parse_user_id(&id)?;

    let user = RoleService::update_user_role(state.store.as_ref(), user_id, &dto.role)
        .await
        .map_err(RoleServiceError::into_app_error)?;

    Ok(Json(user))
}

/// List users holding a role
#[utoipa::path(
    get,
    path = "/api/v1/roles/users",
    params(UsersByRoleQuery),
    responses(
        (status = 200, description = "Users with the requested role", body = Vec<UserResponse>),
        (status = 400, description = "Missing, repeated or invalid role", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Roles"
)]
#[instrument(skip(state))]
pub async fn get_users_by_role(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<UsersByRoleQuery>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let role = query
        .role
        .filter(|r| !r.is_empty())
        .ok_or_else(|| AppError::bad_request(anyhow!("role query parameter is required")))?;

    let users = RoleService::get_users_by_role(state.store.as_ref(), &role)
        .await
        .map_err(RoleServiceError::into_app_error)?;

    Ok(Json(users))
}

/// List every assignable role
#[utoipa::path(
    get,
    path = "/api/v1/roles/available",
    responses(
        (status = 200, description = "All roles", body = AvailableRolesResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Roles"
)]
pub async fn get_available_roles() -> Json<AvailableRolesResponse> {
    Json(AvailableRolesResponse::all())
}
