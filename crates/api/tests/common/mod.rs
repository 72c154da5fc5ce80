//! Shared harness for the API integration tests.
//!
//! Builds the production router (same middleware stack as `main.rs`) over a
//! throwaway data directory, and provides small request helpers around
//! `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tokio::sync::RwLock;
use tower::ServiceExt;

use stitchtrack_api::auth::jwt::JwtConfig;
use stitchtrack_api::config::ServerConfig;
use stitchtrack_api::router::build_app_router;
use stitchtrack_api::seed;
use stitchtrack_api::state::AppState;
use stitchtrack_store::JsonStore;

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config(data_dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        data_dir: data_dir.to_path_buf(),
        jwt: JwtConfig {
            secret: "integration-test-secret-long-enough".to_string(),
            access_token_expiry_mins: 480,
        },
    }
}

/// Build the full application router over `data_dir`, seeding the default
/// user accounts so tests can log in.
pub fn build_test_app(data_dir: &Path) -> Router {
    let config = test_config(data_dir);

    let store = JsonStore::open(data_dir).expect("open test store");
    seed::seed_default_users(&store).expect("seed default users");

    let state = AppState {
        store: Arc::new(RwLock::new(store)),
        config: Arc::new(config.clone()),
    };

    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: &Router, uri: &str) -> Response {
    request(app, Method::GET, uri, None, None).await
}

pub async fn get_authed(app: &Router, uri: &str, token: &str) -> Response {
    request(app, Method::GET, uri, None, Some(token)).await
}

pub async fn post_json(
    app: &Router,
    uri: &str,
    body: serde_json::Value,
    token: Option<&str>,
) -> Response {
    request(app, Method::POST, uri, Some(body), token).await
}

pub async fn put_json(
    app: &Router,
    uri: &str,
    body: serde_json::Value,
    token: Option<&str>,
) -> Response {
    request(app, Method::PUT, uri, Some(body), token).await
}

pub async fn delete(app: &Router, uri: &str, token: Option<&str>) -> Response {
    request(app, Method::DELETE, uri, None, token).await
}

async fn request(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
    token: Option<&str>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.clone().oneshot(request).await.unwrap()
}

/// Collect a response body into a JSON value.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Collect a response body into raw bytes.
pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

// ---------------------------------------------------------------------------
// Auth helpers
// ---------------------------------------------------------------------------

/// Log in and return the access token.
pub async fn login(app: &Router, username: &str, password: &str) -> String {
    let response = post_json(
        app,
        "/api/v1/auth/login",
        serde_json::json!({ "username": username, "password": password }),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK, "login must succeed");

    let json = body_json(response).await;
    json["access_token"].as_str().unwrap().to_string()
}

/// Log in as the seeded manager account.
pub async fn login_manager(app: &Router) -> String {
    login(
        app,
        seed::DEFAULT_MANAGER_USERNAME,
        seed::DEFAULT_MANAGER_PASSWORD,
    )
    .await
}

/// Log in as the seeded collaborator account.
pub async fn login_collaborator(app: &Router) -> String {
    login(
        app,
        seed::DEFAULT_COLLABORATOR_USERNAME,
        seed::DEFAULT_COLLABORATOR_PASSWORD,
    )
    .await
}

/// Create a production record through the API, returning its id.
pub async fn create_record(app: &Router, token: &str, body: serde_json::Value) -> i64 {
    let response = post_json(app, "/api/v1/records", body, Some(token)).await;
    assert_eq!(
        response.status(),
        StatusCode::CREATED,
        "record creation must succeed"
    );
    body_json(response).await["id"].as_i64().unwrap()
}
