//! Handlers for the `/workers` resource (the Worker Registry).
//!
//! The registry is an ordered list of unique names. Renames cascade into the
//! production records and into users whose display name matches; deletion is
//! blocked while any production record references the name.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use stitchtrack_core::error::CoreError;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireManager;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /workers` and `PUT /workers/{name}`.
#[derive(Debug, Deserialize, Validate)]
pub struct WorkerNameRequest {
    #[validate(length(min = 1, message = "Worker name must not be empty"))]
    pub name: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/workers
///
/// List the registry in its stored order.
pub async fn list_workers(State(state): State<AppState>) -> AppResult<Json<Vec<String>>> {
    let store = state.store.read().await;
    let workers = store.load_workers()?;
    Ok(Json(workers))
}

/// POST /api/v1/workers
///
/// Register a new worker name. Returns the updated registry with 201 Created.
pub async fn create_worker(
    State(state): State<AppState>,
    RequireManager(_manager): RequireManager,
    Json(input): Json<WorkerNameRequest>,
) -> AppResult<(StatusCode, Json<Vec<String>>)> {
    let name = validated_name(&input)?;

    let store = state.store.write().await;
    let mut workers = store.load_workers()?;

    if workers.iter().any(|w| w == &name) {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Worker '{name}' already exists"
        ))));
    }

    workers.push(name.clone());
    store.save_workers(&workers)?;

    tracing::info!(worker = %name, "Worker registered");
    Ok((StatusCode::CREATED, Json(workers)))
}

/// PUT /api/v1/workers/{name}
///
/// Rename a worker. Cascades the new name into every production record and
/// into any user whose display name matches the old one.
pub async fn rename_worker(
    State(state): State<AppState>,
    RequireManager(_manager): RequireManager,
    Path(name): Path<String>,
    Json(input): Json<WorkerNameRequest>,
) -> AppResult<Json<Vec<String>>> {
    let new_name = validated_name(&input)?;

    let store = state.store.write().await;
    let mut workers = store.load_workers()?;

    let index = workers
        .iter()
        .position(|w| w == &name)
        .ok_or_else(|| CoreError::not_found("Worker", &name))?;

    if new_name != name && workers.iter().any(|w| w == &new_name) {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Worker '{new_name}' already exists"
        ))));
    }

    workers[index] = new_name.clone();
    store.save_workers(&workers)?;

    // Cascade into production records.
    let mut records = store.load_records()?;
    let mut touched = 0usize;
    for record in records.records.iter_mut().filter(|r| r.worker == name) {
        record.worker = new_name.clone();
        touched += 1;
    }
    if touched > 0 {
        store.save_records(&records)?;
    }

    // Cascade into users whose display name matches.
    let mut users = store.load_users()?;
    let mut users_touched = false;
    for user in users.values_mut().filter(|u| u.display_name == name) {
        user.display_name = new_name.clone();
        users_touched = true;
    }
    if users_touched {
        store.save_users(&users)?;
    }

    tracing::info!(
        from = %name,
        to = %new_name,
        records = touched,
        "Worker renamed"
    );
    Ok(Json(workers))
}

/// DELETE /api/v1/workers/{name}
///
/// Remove a worker from the registry. Refused with 409 Conflict while any
/// production record still references the name.
pub async fn delete_worker(
    State(state): State<AppState>,
    RequireManager(_manager): RequireManager,
    Path(name): Path<String>,
) -> AppResult<StatusCode> {
    let store = state.store.write().await;
    let mut workers = store.load_workers()?;

    let index = workers
        .iter()
        .position(|w| w == &name)
        .ok_or_else(|| CoreError::not_found("Worker", &name))?;

    let records = store.load_records()?;
    if records.records.iter().any(|r| r.worker == name) {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Worker '{name}' has production records and cannot be deleted"
        ))));
    }

    workers.remove(index);
    store.save_workers(&workers)?;

    tracing::info!(worker = %name, "Worker deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Run the derive-based validation, then trim the name.
fn validated_name(input: &WorkerNameRequest) -> AppResult<String> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    let name = input.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Worker name must not be empty".into(),
        )));
    }
    Ok(name)
}
