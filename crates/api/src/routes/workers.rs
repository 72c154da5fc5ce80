//! Route definitions for the `/workers` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::workers;
use crate::state::AppState;

/// Routes mounted at `/workers`.
///
/// Mutations require the `manager` role (enforced by handler extractors).
///
/// ```text
/// GET    /        -> list_workers
/// POST   /        -> create_worker
/// PUT    /{name}  -> rename_worker
/// DELETE /{name}  -> delete_worker
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(workers::list_workers).post(workers::create_worker),
        )
        .route(
            "/{name}",
            axum::routing::put(workers::rename_worker).delete(workers::delete_worker),
        )
}
