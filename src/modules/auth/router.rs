use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::middleware::auth::authenticate;
use crate::state::AppState;

use super::controller::{get_me, login_user, refresh_token, register_user};

/// `/me` needs an access token. Registration, login and refresh do not.
pub fn init_auth_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/me", get(get_me))
        .route_layer(middleware::from_fn_with_state(state, authenticate))
        .route("/register", post(register_user))
        .route("/login", post(login_user))
        .route("/refresh", post(refresh_token))
}
