//! # Auth Handler Tests
//!
//! Test suite for the credential endpoints and the auth gate, driven through
//! the real router.

mod integration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use lib_core::dto::ErrorResponse;
use lib_core::model::store::create_memory_pool;
use lib_core::{Config, DbPool};
use serde::de::DeserializeOwned;
use tower::ServiceExt;

use crate::server::{create_router, AppState};

pub const TEST_SECRET: &str = "test-secret-key-must-be-at-least-32-characters-long!";

/// Setup a migrated in-memory store
pub async fn setup_test_db() -> DbPool {
    create_memory_pool()
        .await
        .expect("Failed to create test database")
}

/// Create test config
pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        token_secret: TEST_SECRET.to_string(),
        jwt_expiration_hours: 24,
        store_timeout_ms: 5_000,
        hash_timeout_ms: 10_000,
        bind_address: "127.0.0.1:0".to_string(),
    }
}

/// Create the full application router over `pool`
pub fn test_app(pool: DbPool) -> Router {
    let state = AppState::new(pool, test_config()).expect("Test state should build");
    create_router(state, &[])
}

/// Send a request with an optional JSON body and token, returning status,
/// headers and the raw body.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<String>,
    token: Option<&str>,
) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header("content-type", "application/json");
    }
    if let Some(token) = token {
        builder = builder.header("auth-token", token);
    }
    let request = builder
        .body(body.map(Body::from).unwrap_or_else(Body::empty))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, headers, bytes.to_vec())
}

/// POST `value` as JSON to `uri`.
pub async fn post_json(
    app: &Router,
    uri: &str,
    value: serde_json::Value,
) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    send(app, "POST", uri, Some(value.to_string()), None).await
}

pub fn parse<T: DeserializeOwned>(body: &[u8]) -> T {
    serde_json::from_slice(body).unwrap_or_else(|e| {
        panic!(
            "Unexpected body {:?}: {}",
            String::from_utf8_lossy(body),
            e
        )
    })
}

pub fn error_of(body: &[u8]) -> String {
    parse::<ErrorResponse>(body).error
}

/// Register Ann and return the new user id.
pub async fn register_ann(app: &Router) -> String {
    let (status, _, body) = post_json(
        app,
        "/api/user/register",
        serde_json::json!({"name": "Ann", "email": "ann@x.com", "password": "secret1"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    parse::<lib_core::dto::RegisterResponse>(&body).user
}

/// Log in as Ann and return the token.
pub async fn login_ann(app: &Router) -> String {
    let (status, _, body) = post_json(
        app,
        "/api/user/login",
        serde_json::json!({"email": "ann@x.com", "password": "secret1"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    parse::<lib_core::dto::LoginResponse>(&body).token
}
