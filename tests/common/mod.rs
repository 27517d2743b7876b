#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::Utc;
use http_body_util::BodyExt;
use rolegate::config::{CorsConfig, JwtConfig};
use rolegate::router::init_router;
use rolegate::state::AppState;
use rolegate_auth::create_access_token;
use rolegate_db::MemoryUserStore;
use rolegate_models::{Role, User};
use serde_json::Value;
use tower::ServiceExt;

pub const ADMIN_ID: i64 = 100;
pub const MODERATOR_ID: i64 = 200;
pub const PLAIN_USER_ID: i64 = 300;

pub fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret".to_string(),
        access_token_expiry: 3600,
        refresh_token_expiry: 604800,
    }
}

pub fn test_user(id: i64, role: Role) -> User {
    let now = Utc::now();
    User {
        id,
        name: format!("Test User {}", id),
        email: format!("user{}@test.com", id),
        password_hash: "$2b$04$not-a-real-hash-for-tests".to_string(),
        role,
        created_at: now,
        updated_at: now,
    }
}

/// One admin, one moderator and one plain user, plus `extra`.
pub fn seed_users(extra: Vec<User>) -> Vec<User> {
    let mut users = vec![
        test_user(ADMIN_ID, Role::Admin),
        test_user(MODERATOR_ID, Role::Moderator),
        test_user(PLAIN_USER_ID, Role::User),
    ];
    users.extend(extra);
    users
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryUserStore>,
}

impl TestApp {
    pub fn new(users: Vec<User>) -> Self {
        let store = Arc::new(MemoryUserStore::with_users(users));
        let state = AppState::new(
            store.clone(),
            jwt_config(),
            CorsConfig {
                allowed_origins: vec!["http://localhost:5173".to_string()],
            },
        );

        Self {
            router: init_router(state),
            store,
        }
    }

    pub fn seeded() -> Self {
        Self::new(seed_users(vec![]))
    }

    /// A token for `user_id`. The role claim is only informational; the
    /// server reads the role from the store.
    pub fn token_for(&self, user_id: i64, role: Role) -> String {
        create_access_token(user_id, &format!("user{}@test.com", user_id), role, &jwt_config())
            .unwrap()
    }

    pub fn admin_token(&self) -> String {
        self.token_for(ADMIN_ID, Role::Admin)
    }

    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        (status, json)
    }
}
