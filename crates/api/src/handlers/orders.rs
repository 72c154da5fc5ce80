//! Handlers for the `/orders` resource (the order summary report).

use axum::extract::{Path, State};
use axum::Json;
use stitchtrack_core::summary::{summarize_order, OrderSummary};

use crate::error::AppResult;
use crate::state::AppState;

/// GET /api/v1/orders/{order_id}/summary
///
/// Aggregate every record of the order into the per-worker, per-position,
/// per-product-type, and per-process report. 404 when no record matches.
pub async fn order_summary(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> AppResult<Json<OrderSummary>> {
    let store = state.store.read().await;
    let records = store.load_records()?.records;
    drop(store);

    let summary = summarize_order(&records, &order_id)?;
    Ok(Json(summary))
}
