//! Integration tests for `/auth/login` and token-guarded access.

mod common;

use axum::http::StatusCode;
use common::{body_json, post_json};
use tempfile::TempDir;

#[tokio::test]
async fn login_with_seeded_manager_succeeds() {
    let dir = TempDir::new().unwrap();
    let app = common::build_test_app(dir.path());

    let response = post_json(
        &app,
        "/api/v1/auth/login",
        serde_json::json!({ "username": "manager", "password": "admin123" }),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    assert!(json["expires_in"].as_i64().unwrap() > 0);
    assert_eq!(json["user"]["role"], "manager");
    assert_eq!(json["user"]["username"], "manager");
}

#[tokio::test]
async fn wrong_password_is_401() {
    let dir = TempDir::new().unwrap();
    let app = common::build_test_app(dir.path());

    let response = post_json(
        &app,
        "/api/v1/auth/login",
        serde_json::json!({ "username": "manager", "password": "nope" }),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn unknown_user_gets_same_message_as_wrong_password() {
    let dir = TempDir::new().unwrap();
    let app = common::build_test_app(dir.path());

    let wrong_password = post_json(
        &app,
        "/api/v1/auth/login",
        serde_json::json!({ "username": "manager", "password": "nope" }),
        None,
    )
    .await;
    let unknown_user = post_json(
        &app,
        "/api/v1/auth/login",
        serde_json::json!({ "username": "ghost", "password": "nope" }),
        None,
    )
    .await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);

    // Same body either way: the endpoint must not reveal which accounts exist.
    let a = body_json(wrong_password).await;
    let b = body_json(unknown_user).await;
    assert_eq!(a["error"], b["error"]);
}

#[tokio::test]
async fn token_unlocks_protected_route() {
    let dir = TempDir::new().unwrap();
    let app = common::build_test_app(dir.path());

    // Without a token the mutation is rejected.
    let response = post_json(
        &app,
        "/api/v1/workers",
        serde_json::json!({ "name": "Nova" }),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // With a manager token it goes through.
    let token = common::login_manager(&app).await;
    let response = post_json(
        &app,
        "/api/v1/workers",
        serde_json::json!({ "name": "Nova" }),
        Some(&token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn garbage_token_is_401() {
    let dir = TempDir::new().unwrap();
    let app = common::build_test_app(dir.path());

    let response = post_json(
        &app,
        "/api/v1/workers",
        serde_json::json!({ "name": "Nova" }),
        Some("not-a-jwt"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
