use axum::Router;
use axum::body::Body;
use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use http_body_util::BodyExt;
use rolegate::middleware::auth::Principal;
use rolegate::middleware::role::{require_admin, require_moderator_or_admin};
use rolegate_models::Role;
use tower::ServiceExt;

async fn attach(role: Option<Role>, mut req: Request, next: Next) -> Response {
    if let Some(role) = role {
        req.extensions_mut().insert(Principal {
            user_id: 1,
            email: "p@test.com".to_string(),
            role,
        });
    }
    next.run(req).await
}

fn guarded_app(role: Option<Role>, admin_only: bool) -> Router {
    let router = Router::new().route("/guarded", get(|| async { "ok" }));
    let router = if admin_only {
        router.route_layer(middleware::from_fn(require_admin))
    } else {
        router.route_layer(middleware::from_fn(require_moderator_or_admin))
    };
    router.route_layer(middleware::from_fn(move |req: Request, next: Next| attach(role, req, next)))
}

async fn status_of(app: Router) -> (StatusCode, String) {
    let response = app
        .oneshot(axum::http::Request::builder().uri("/guarded").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn test_admin_passes_admin_only() {
    let (status, body) = status_of(guarded_app(Some(Role::Admin), true)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn test_moderator_blocked_from_admin_only() {
    let (status, body) = status_of(guarded_app(Some(Role::Moderator), true)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body.contains("moderator"));
}

#[tokio::test]
async fn test_user_blocked_from_moderator_or_admin() {
    let (status, _) = status_of(guarded_app(Some(Role::User), false)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_moderator_and_admin_pass_moderator_or_admin() {
    for role in [Role::Moderator, Role::Admin] {
        let (status, _) = status_of(guarded_app(Some(role), false)).await;
        assert_eq!(status, StatusCode::OK, "role {} should pass", role);
    }
}

#[tokio::test]
async fn test_missing_principal_is_forbidden_not_unauthorized() {
    for admin_only in [true, false] {
        let (status, body) = status_of(guarded_app(None, admin_only)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert!(json["error"].as_str().unwrap().contains("No authenticated principal"));
    }
}
