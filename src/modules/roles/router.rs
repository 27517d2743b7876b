use axum::{
    Router,
    routing::{get, put},
};

use crate::state::AppState;

use super::controller::{get_available_roles, get_users_by_role, update_user_role};

pub fn init_roles_router() -> Router<AppState> {
    Router::new()
        .route("/users/{id}/role", put(update_user_role))
        .route("/users", get(get_users_by_role))
        .route("/available", get(get_available_roles))
}
