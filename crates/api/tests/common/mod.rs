//! Shared helpers for HTTP-level integration tests.
//!
//! `build_test_app` mirrors the router construction in `main.rs` so tests
//! exercise the same middleware stack (CORS, request ID, timeout, tracing,
//! panic recovery) that production uses.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use sqlx::PgPool;
use tower::ServiceExt;

use colist_api::auth::jwt::JwtConfig;
use colist_api::config::ServerConfig;
use colist_api::router::build_app_router;
use colist_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret-not-for-production".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("request should build"),
        None => builder.body(Body::empty()).expect("request should build"),
    };

    app.oneshot(request).await.expect("request should not fail")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Read a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    use http_body_util::BodyExt;

    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

// ---------------------------------------------------------------------------
// Domain helpers
// ---------------------------------------------------------------------------

/// Register a user through the API and return `(user_id, access_token)`.
pub async fn register_user(app: Router, login: &str) -> (i64, String) {
    let body = serde_json::json!({
        "name": format!("Test {login}"),
        "login": login,
        "password": "test_password_123",
    });
    let response = post_json(app, "/api/auth/register", body).await;
    assert_eq!(
        response.status(),
        axum::http::StatusCode::CREATED,
        "registration should succeed"
    );

    let json = body_json(response).await;
    let user_id = json["user"]["id"].as_i64().expect("user id");
    let token = json["accessToken"].as_str().expect("access token").to_string();
    (user_id, token)
}

/// Create a list through the API and return its id.
pub async fn create_list(app: Router, token: &str, name: &str) -> i64 {
    let response =
        post_json_auth(app, "/api/lists", serde_json::json!({ "name": name }), token).await;
    assert_eq!(
        response.status(),
        axum::http::StatusCode::CREATED,
        "list creation should succeed"
    );

    let json = body_json(response).await;
    json["id"].as_i64().expect("list id")
}

/// Share `list_id` with the user identified by `login` (caller must be owner).
pub async fn share_list(app: Router, token: &str, list_id: i64, login: &str) {
    let response = post_json_auth(
        app,
        &format!("/api/lists/{list_id}/share"),
        serde_json::json!({ "login": login }),
        token,
    )
    .await;
    assert_eq!(
        response.status(),
        axum::http::StatusCode::CREATED,
        "share should succeed"
    );
}
