use axum::http::{HeaderValue, Method, header};
use axum::{Router, middleware};
use rolegate_observability::{logging_middleware, metrics_middleware};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use crate::config::CorsConfig;
use crate::docs::ApiDoc;
use crate::middleware::auth::authenticate;
use crate::middleware::role::{require_admin, require_moderator_or_admin};
use crate::modules::auth::router::init_auth_router;
use crate::modules::health::router::init_health_router;
use crate::modules::roles::router::init_roles_router;
use crate::modules::users::router::{init_user_management_router, init_users_router};
use crate::state::AppState;

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}

pub fn init_router(state: AppState) -> Router {
    let api = Router::new()
        .nest(
            "/roles",
            init_roles_router()
                .route_layer(middleware::from_fn(require_admin))
                .route_layer(middleware::from_fn_with_state(state.clone(), authenticate)),
        )
        .nest(
            "/users",
            init_users_router()
                .route_layer(middleware::from_fn(require_moderator_or_admin))
                .merge(
                    init_user_management_router()
                        .route_layer(middleware::from_fn(require_admin)),
                )
                .route_layer(middleware::from_fn_with_state(state.clone(), authenticate)),
        )
        .nest("/auth", init_auth_router(state.clone()))
        .nest("/health", init_health_router());

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest("/api/v1", api)
        .with_state(state.clone())
        .layer(cors_layer(&state.cors_config))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
}
