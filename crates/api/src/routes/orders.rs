//! Route definitions for the `/orders` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::orders;
use crate::state::AppState;

/// Routes mounted at `/orders`.
///
/// ```text
/// GET /{order_id}/summary -> order_summary
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{order_id}/summary", get(orders::order_summary))
}
