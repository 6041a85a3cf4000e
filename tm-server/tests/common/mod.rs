#![allow(dead_code)]

//! Test infrastructure for tm-server API tests

use tm_server::AppState;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "test-secret-key-at-least-32-bytes";

/// Create a test pool with in-memory SQLite
pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .create_if_missing(true);

    // In-memory SQLite: a second connection would see a different database
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("Failed to create test database");

    sqlx::migrate!("../crates/tm-db/migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Create AppState for testing
pub async fn create_test_app_state() -> AppState {
    let pool = create_test_pool().await;

    let mut config = tm_config::Config::default();
    config.auth.jwt_secret = Some(TEST_SECRET.to_string());
    // Generous quota so ordinary tests never trip the limiter
    config.rate_limit.max_attempts = 1000;

    AppState::new(pool, &config).expect("Failed to build app state")
}

/// Create AppState with a tight rate limit for throttling tests
pub async fn create_rate_limited_app_state(max_attempts: u32) -> AppState {
    let pool = create_test_pool().await;

    let mut config = tm_config::Config::default();
    config.auth.jwt_secret = Some(TEST_SECRET.to_string());
    config.rate_limit.max_attempts = max_attempts;
    config.rate_limit.window_secs = 60;

    AppState::new(pool, &config).expect("Failed to build app state")
}

/// POST a JSON body and return (status, parsed response body)
pub async fn post_json(
    app: &Router,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    send(app, request).await
}

/// POST a JSON body with a bearer token
pub async fn post_json_authed(
    app: &Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(body.to_string()))
        .unwrap();

    send(app, request).await
}

/// Send an arbitrary authed request with no body
pub async fn request_authed(
    app: &Router,
    method: &str,
    uri: &str,
    token: &str,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

/// Send an authed request carrying a JSON body
pub async fn request_json_authed(
    app: &Router,
    method: &str,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(body.to_string()))
        .unwrap();

    send(app, request).await
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };

    (status, json)
}

/// Register alice and log her in, returning (access_token, refresh_token)
pub async fn register_and_login(app: &Router) -> (String, String) {
    let (status, _) = post_json(
        app,
        "/api/v1/auth/register",
        serde_json::json!({
            "userName": "alice",
            "email": "a@x.com",
            "password": "Secret123"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = post_json(
        app,
        "/api/v1/auth/login",
        serde_json::json!({ "email": "a@x.com", "password": "Secret123" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    (
        body["accessToken"].as_str().unwrap().to_string(),
        body["refreshToken"].as_str().unwrap().to_string(),
    )
}
