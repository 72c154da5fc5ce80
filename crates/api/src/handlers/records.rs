//! Handlers for the `/records` resource (production records).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use stitchtrack_core::error::CoreError;
use stitchtrack_core::parse::digit_count;
use stitchtrack_core::record::{ProductionRecord, RecordInput};
use stitchtrack_core::types::RecordId;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /records` and `GET /records/stats`.
#[derive(Debug, Deserialize)]
pub struct RecordFilter {
    /// When present, keep only records of this worker (exact match).
    pub worker: Option<String>,
}

/// Response body for `GET /records/stats`.
#[derive(Debug, Serialize)]
pub struct RecordStats {
    pub record_count: u64,
    pub total_pieces: u64,
    pub total_stitches: u64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/records?worker=NAME
///
/// List production records, optionally filtered by worker.
pub async fn list_records(
    State(state): State<AppState>,
    Query(filter): Query<RecordFilter>,
) -> AppResult<Json<Vec<ProductionRecord>>> {
    let store = state.store.read().await;
    let mut records = store.load_records()?.records;

    if let Some(worker) = filter.worker {
        records.retain(|r| r.worker == worker);
    }

    Ok(Json(records))
}

/// POST /api/v1/records
///
/// Create a record. The id comes from the persisted monotonic counter and
/// `created_at` is set to now; the worker must exist in the registry.
pub async fn create_record(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Json(input): Json<RecordInput>,
) -> AppResult<(StatusCode, Json<ProductionRecord>)> {
    validate_input(&input)?;

    let store = state.store.write().await;
    ensure_registered_worker(&store, &input.worker)?;

    let mut file = store.load_records()?;
    let id = file.allocate_id();
    let record = ProductionRecord::from_input(id, Utc::now(), input);
    file.records.push(record.clone());
    store.save_records(&file)?;

    tracing::info!(id, order_id = %record.order_id, worker = %record.worker, "Record created");
    Ok((StatusCode::CREATED, Json(record)))
}

/// PUT /api/v1/records/{id}
///
/// Replace every field of a record except its `id` and `created_at`.
pub async fn update_record(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<RecordId>,
    Json(input): Json<RecordInput>,
) -> AppResult<Json<ProductionRecord>> {
    validate_input(&input)?;

    let store = state.store.write().await;
    ensure_registered_worker(&store, &input.worker)?;

    let mut file = store.load_records()?;
    let record = file
        .records
        .iter_mut()
        .find(|r| r.id == id)
        .ok_or_else(|| CoreError::not_found("Record", id.to_string()))?;

    record.apply(input);
    let updated = record.clone();
    store.save_records(&file)?;

    tracing::info!(id, "Record updated");
    Ok(Json(updated))
}

/// DELETE /api/v1/records/{id}
///
/// Remove a record. Idempotent: deleting an id that does not exist is still
/// 204, matching the legacy behaviour. The id counter never regresses, so a
/// deleted id is not handed out again.
pub async fn delete_record(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<RecordId>,
) -> AppResult<StatusCode> {
    let store = state.store.write().await;
    let mut file = store.load_records()?;

    let before = file.records.len();
    file.records.retain(|r| r.id != id);
    if file.records.len() != before {
        store.save_records(&file)?;
        tracing::info!(id, "Record deleted");
    }

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/records/stats?worker=NAME
///
/// Overall piece and stitch totals, using the same digit-extraction parsing
/// as the order summary.
pub async fn record_stats(
    State(state): State<AppState>,
    Query(filter): Query<RecordFilter>,
) -> AppResult<Json<RecordStats>> {
    let store = state.store.read().await;
    let mut records = store.load_records()?.records;

    if let Some(worker) = filter.worker {
        records.retain(|r| r.worker == worker);
    }

    let stats = RecordStats {
        record_count: records.len() as u64,
        total_pieces: records.iter().map(|r| digit_count(&r.quantity)).sum(),
        total_stitches: records.iter().map(|r| digit_count(&r.stitch_count)).sum(),
    };

    Ok(Json(stats))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn validate_input(input: &RecordInput) -> AppResult<()> {
    if input.order_id.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "order_id must not be empty".into(),
        )));
    }
    Ok(())
}

/// Reject records naming a worker the registry does not know.
fn ensure_registered_worker(
    store: &stitchtrack_store::JsonStore,
    worker: &str,
) -> AppResult<()> {
    let workers = store.load_workers()?;
    if !workers.iter().any(|w| w == worker) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Worker '{worker}' is not in the registry"
        ))));
    }
    Ok(())
}
