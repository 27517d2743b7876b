use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

use super::controller::{create_user, delete_user, get_user, get_users, update_user};

/// Read-only directory routes.
pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_users))
        .route("/{id}", get(get_user))
}

/// Create, rename and delete. Mounted behind an admin-only guard.
pub fn init_user_management_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_user))
        .route("/{id}", put(update_user).delete(delete_user))
}
