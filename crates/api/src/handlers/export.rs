//! Handler for `POST /export` (zip bundle of CSV report sheets).

use axum::extract::State;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::{HeaderName, StatusCode};
use chrono::Utc;

use crate::error::{AppError, AppResult};
use crate::export::build_export_zip;
use crate::middleware::rbac::RequireAuth;
use crate::state::AppState;

/// POST /api/v1/export
///
/// Bundle the full production data into a zip of CSV sheets (one complete
/// sheet plus one per worker) and return it as a download. 400 when there is
/// nothing to export.
pub async fn export_records(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> AppResult<(StatusCode, [(HeaderName, String); 2], Vec<u8>)> {
    let store = state.store.read().await;
    let records = store.load_records()?.records;
    drop(store);

    if records.is_empty() {
        return Err(AppError::BadRequest("No data to export".into()));
    }

    let bytes = build_export_zip(&records)
        .map_err(|e| AppError::InternalError(format!("Export bundling error: {e}")))?;

    let stamp = Utc::now().format("%Y%m%d_%H%M%S");
    let filename = format!("production_export_{stamp}.zip");

    tracing::info!(records = records.len(), %filename, "Export generated");

    Ok((
        StatusCode::OK,
        [
            (CONTENT_TYPE, "application/zip".to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    ))
}
