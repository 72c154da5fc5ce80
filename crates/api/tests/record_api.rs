//! Integration tests for the `/records` resource.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, put_json};
use tempfile::TempDir;

fn sample_record(order_id: &str, worker: &str) -> serde_json::Value {
    serde_json::json!({
        "order_id": order_id,
        "worker": worker,
        "date": "2026-08-10",
        "quantity": "10",
        "stitch_count": "500",
        "front": true,
        "embroidery": true
    })
}

#[tokio::test]
async fn create_assigns_monotonic_ids_across_deletes() {
    let dir = TempDir::new().unwrap();
    let app = common::build_test_app(dir.path());
    let token = common::login_manager(&app).await;

    let first = common::create_record(&app, &token, sample_record("A1", "Ana Costa")).await;
    let second = common::create_record(&app, &token, sample_record("A1", "Maria Santos")).await;
    assert_eq!(second, first + 1);

    // Deleting the newest record must not free its id for reuse.
    let response = delete(&app, &format!("/api/v1/records/{second}"), Some(&token)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let third = common::create_record(&app, &token, sample_record("A2", "Ana Costa")).await;
    assert_eq!(third, second + 1);
}

#[tokio::test]
async fn create_requires_authentication() {
    let dir = TempDir::new().unwrap();
    let app = common::build_test_app(dir.path());

    let response = post_json(&app, "/api/v1/records", sample_record("A1", "Ana Costa"), None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn create_rejects_unregistered_worker() {
    let dir = TempDir::new().unwrap();
    let app = common::build_test_app(dir.path());
    let token = common::login_manager(&app).await;

    let response = post_json(
        &app,
        "/api/v1/records",
        sample_record("A1", "Nobody"),
        Some(&token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_rejects_empty_order_id() {
    let dir = TempDir::new().unwrap();
    let app = common::build_test_app(dir.path());
    let token = common::login_manager(&app).await;

    let response = post_json(
        &app,
        "/api/v1/records",
        sample_record("   ", "Ana Costa"),
        Some(&token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn legacy_marker_accepted_as_flag_value() {
    let dir = TempDir::new().unwrap();
    let app = common::build_test_app(dir.path());
    let token = common::login_manager(&app).await;

    // Old clients send "X" for a set flag and "" for an unset one.
    let response = post_json(
        &app,
        "/api/v1/records",
        serde_json::json!({
            "order_id": "A1",
            "worker": "Ana Costa",
            "date": "2026-08-10",
            "quantity": "4",
            "stitch_count": "120",
            "front": "X",
            "back": "",
            "cap": "X"
        }),
        Some(&token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["front"], true);
    assert_eq!(json["back"], false);
    assert_eq!(json["cap"], true);
}

#[tokio::test]
async fn list_filters_by_worker() {
    let dir = TempDir::new().unwrap();
    let app = common::build_test_app(dir.path());
    let token = common::login_manager(&app).await;

    common::create_record(&app, &token, sample_record("A1", "Ana Costa")).await;
    common::create_record(&app, &token, sample_record("A1", "Maria Santos")).await;
    common::create_record(&app, &token, sample_record("A2", "Ana Costa")).await;

    let all = body_json(get(&app, "/api/v1/records").await).await;
    assert_eq!(all.as_array().unwrap().len(), 3);

    let filtered = body_json(get(&app, "/api/v1/records?worker=Ana%20Costa").await).await;
    let filtered = filtered.as_array().unwrap();
    assert_eq!(filtered.len(), 2);
    assert!(filtered.iter().all(|r| r["worker"] == "Ana Costa"));
}

#[tokio::test]
async fn update_preserves_id_and_created_at() {
    let dir = TempDir::new().unwrap();
    let app = common::build_test_app(dir.path());
    let token = common::login_manager(&app).await;

    let id = common::create_record(&app, &token, sample_record("A1", "Ana Costa")).await;
    let original = body_json(get(&app, "/api/v1/records").await).await;
    let created_at = original[0]["created_at"].clone();

    let response = put_json(
        &app,
        &format!("/api/v1/records/{id}"),
        sample_record("A9", "Maria Santos"),
        Some(&token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["id"].as_i64().unwrap(), id);
    assert_eq!(json["order_id"], "A9");
    assert_eq!(json["worker"], "Maria Santos");
    assert_eq!(json["created_at"], created_at);
}

#[tokio::test]
async fn update_unknown_id_is_404() {
    let dir = TempDir::new().unwrap();
    let app = common::build_test_app(dir.path());
    let token = common::login_manager(&app).await;

    let response = put_json(
        &app,
        "/api/v1/records/9999",
        sample_record("A1", "Ana Costa"),
        Some(&token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let app = common::build_test_app(dir.path());
    let token = common::login_manager(&app).await;

    let id = common::create_record(&app, &token, sample_record("A1", "Ana Costa")).await;

    let response = delete(&app, &format!("/api/v1/records/{id}"), Some(&token)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // A second delete of the same id is still 204.
    let response = delete(&app, &format!("/api/v1/records/{id}"), Some(&token)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn stats_use_digit_extraction() {
    let dir = TempDir::new().unwrap();
    let app = common::build_test_app(dir.path());
    let token = common::login_manager(&app).await;

    common::create_record(
        &app,
        &token,
        serde_json::json!({
            "order_id": "A1",
            "worker": "Ana Costa",
            "date": "2026-08-10",
            "quantity": "7pcs",
            "stitch_count": "1.200"
        }),
    )
    .await;
    common::create_record(
        &app,
        &token,
        serde_json::json!({
            "order_id": "A1",
            "worker": "Maria Santos",
            "date": "2026-08-11",
            "quantity": "N/A",
            "stitch_count": "300"
        }),
    )
    .await;

    let json = body_json(get(&app, "/api/v1/records/stats").await).await;
    assert_eq!(json["record_count"], 2);
    assert_eq!(json["total_pieces"], 7);
    assert_eq!(json["total_stitches"], 1500);
}
