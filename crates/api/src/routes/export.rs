//! Route definitions for the `/export` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::export;
use crate::state::AppState;

/// Routes mounted at `/export`.
///
/// ```text
/// POST / -> export_records (auth required)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(export::export_records))
}
