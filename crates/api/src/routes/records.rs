//! Route definitions for the `/records` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::records;
use crate::state::AppState;

/// Routes mounted at `/records`.
///
/// Listings and stats are public; mutations require authentication.
///
/// ```text
/// GET    /        -> list_records    (?worker=NAME)
/// POST   /        -> create_record
/// GET    /stats   -> record_stats    (?worker=NAME)
/// PUT    /{id}    -> update_record
/// DELETE /{id}    -> delete_record
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(records::list_records).post(records::create_record),
        )
        .route("/stats", get(records::record_stats))
        .route(
            "/{id}",
            axum::routing::put(records::update_record).delete(records::delete_record),
        )
}
