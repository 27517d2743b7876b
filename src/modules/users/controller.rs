use axum::{Json, extract::State, http::StatusCode};
use rolegate_core::AppError;
use rolegate_models::{CreateUserDto, UpdateUserDto, UserResponse};
use tracing::instrument;

use crate::middleware::auth::Principal;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedPath};

use super::service::UserService;

/// List all users
#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "All users, ordered by id", body = Vec<UserResponse>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is neither admin nor moderator", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_users(State(state): State<AppState>) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = UserService::get_users(state.store.as_ref()).await?;
    Ok(Json(users))
}

/// Get a user by id
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 400, description = "Invalid user ID", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is neither admin nor moderator", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<i64>,
) -> Result<Json<UserResponse>, AppError> {
    let user = UserService::get_user(state.store.as_ref(), id).await?;
    Ok(Json(user))
}

/// Create a user with any role
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Validation error, invalid role or email already exists", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, principal, dto), fields(actor_id = principal.user_id))]
pub async fn create_user(
    State(state): State<AppState>,
    principal: Principal,
    ValidatedJson(dto): ValidatedJson<CreateUserDto>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let user = UserService::create_user(state.store.as_ref(), dto).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Rename a user
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Invalid user ID or validation error", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, principal, dto), fields(actor_id = principal.user_id))]
pub async fn update_user(
    State(state): State<AppState>,
    principal: Principal,
    ValidatedPath(id): ValidatedPath<i64>,
    ValidatedJson(dto): ValidatedJson<UpdateUserDto>,
) -> Result<Json<UserResponse>, AppError> {
    let user = UserService::update_user(state.store.as_ref(), id, dto).await?;
    Ok(Json(user))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Invalid user ID or own account", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, principal), fields(actor_id = principal.user_id))]
pub async fn delete_user(
    State(state): State<AppState>,
    principal: Principal,
    ValidatedPath(id): ValidatedPath<i64>,
) -> Result<StatusCode, AppError> {
    UserService::delete_user(state.store.as_ref(), principal.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
