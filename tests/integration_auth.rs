mod common;

use axum::http::StatusCode;
use common::{PLAIN_USER_ID, TestApp, jwt_config};
use rolegate_auth::create_refresh_token;
use rolegate_db::UserStore;
use rolegate_models::Role;
use serde_json::json;

#[tokio::test]
async fn test_register_login_and_me() {
    let app = TestApp::seeded();

    let (status, body) = app
        .send(
            "POST",
            "/api/v1/auth/register",
            None,
            Some(json!({
                "name": "Katherine Johnson",
                "email": "katherine@test.com",
                "password": "orbital-mechanics"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["role"], "user");
    assert!(body.get("password_hash").is_none());
    let user_id = body["id"].as_i64().unwrap();

    let (status, body) = app
        .send(
            "POST",
            "/api/v1/auth/login",
            None,
            Some(json!({
                "email": "katherine@test.com",
                "password": "orbital-mechanics"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["expires_in"], 3600);
    assert_eq!(body["user"]["email"], "katherine@test.com");
    let token = body["access_token"].as_str().unwrap().to_string();

    let (status, body) = app.send("GET", "/api/v1/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], user_id);
    assert_eq!(body["role"], "user");
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::seeded();
    let payload = json!({
        "name": "Dup",
        "email": format!("user{}@test.com", PLAIN_USER_ID),
        "password": "password123"
    });

    let (status, body) = app
        .send("POST", "/api/v1/auth/register", None, Some(payload))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Email already exists");
}

#[tokio::test]
async fn test_register_validation() {
    let app = TestApp::seeded();

    let (status, body) = app
        .send(
            "POST",
            "/api/v1/auth/register",
            None,
            Some(json!({ "name": "Short", "email": "short@test.com", "password": "abc" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "password must be at least 8 characters");

    let (status, _) = app
        .send(
            "POST",
            "/api/v1/auth/register",
            None,
            Some(json!({ "name": "Bad", "email": "not-an-email", "password": "password123" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_ignores_role_in_body() {
    let app = TestApp::seeded();

    let (status, body) = app
        .send(
            "POST",
            "/api/v1/auth/register",
            None,
            Some(json!({
                "name": "Sneaky",
                "email": "sneaky@test.com",
                "password": "password123",
                "role": "admin"
            })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["role"], "user");
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    let app = TestApp::seeded();

    let (status, body) = app
        .send(
            "POST",
            "/api/v1/auth/login",
            None,
            Some(json!({ "email": "nobody@test.com", "password": "whatever" })),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid email or password");
}

#[tokio::test]
async fn test_me_requires_token() {
    let app = TestApp::seeded();

    let (status, _) = app.send("GET", "/api/v1/auth/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let token = app.token_for(PLAIN_USER_ID, Role::User);
    let (status, body) = app.send("GET", "/api/v1/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], PLAIN_USER_ID);
}

#[tokio::test]
async fn test_malformed_authorization_header() {
    let app = TestApp::seeded();
    let request = axum::http::Request::builder()
        .uri("/api/v1/auth/me")
        .header("authorization", "Token abc")
        .body(axum::body::Body::empty())
        .unwrap();

    let response = tower::ServiceExt::oneshot(app.router.clone(), request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_issues_new_tokens_with_current_role() {
    let app = TestApp::seeded();
    let refresh = create_refresh_token(
        PLAIN_USER_ID,
        &format!("user{}@test.com", PLAIN_USER_ID),
        &jwt_config(),
    )
    .unwrap();
    app.store
        .update_role(PLAIN_USER_ID, Role::Moderator)
        .await
        .unwrap();

    let (status, body) = app
        .send(
            "POST",
            "/api/v1/auth/refresh",
            None,
            Some(json!({ "refresh_token": refresh })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["user"]["role"], "moderator");
    assert_ne!(body["refresh_token"].as_str().unwrap(), refresh);

    let token = body["access_token"].as_str().unwrap().to_string();
    let (status, _) = app.send("GET", "/api/v1/users", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_refresh_rejects_access_token() {
    let app = TestApp::seeded();
    let access = app.token_for(PLAIN_USER_ID, Role::User);

    let (status, body) = app
        .send(
            "POST",
            "/api/v1/auth/refresh",
            None,
            Some(json!({ "refresh_token": access })),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid or expired refresh token");
}

#[tokio::test]
async fn test_refresh_requires_token_field() {
    let app = TestApp::seeded();

    let (status, body) = app
        .send("POST", "/api/v1/auth/refresh", None, Some(json!({})))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "refresh_token is required");
}

#[tokio::test]
async fn test_login_returns_usable_refresh_token() {
    let app = TestApp::seeded();
    app.send(
        "POST",
        "/api/v1/auth/register",
        None,
        Some(json!({
            "name": "Mary Jackson",
            "email": "mary@test.com",
            "password": "wind-tunnel"
        })),
    )
    .await;

    let (status, body) = app
        .send(
            "POST",
            "/api/v1/auth/login",
            None,
            Some(json!({ "email": "mary@test.com", "password": "wind-tunnel" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let refresh = body["refresh_token"].as_str().unwrap().to_string();

    let (status, body) = app
        .send(
            "POST",
            "/api/v1/auth/refresh",
            None,
            Some(json!({ "refresh_token": refresh })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], "mary@test.com");
}
