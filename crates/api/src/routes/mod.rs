pub mod auth;
pub mod export;
pub mod health;
pub mod orders;
pub mod records;
pub mod users;
pub mod workers;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                  login (public)
///
/// /workers                     list (public), add (manager)
/// /workers/{name}              rename, delete (manager)
///
/// /records                     list (?worker=), create (auth)
/// /records/stats               piece/stitch totals (?worker=)
/// /records/{id}                update, delete (auth)
///
/// /orders/{order_id}/summary   aggregated order report
///
/// /export                      zip of CSV sheets (auth, POST)
///
/// /users                       list, create (manager)
/// /users/{username}            delete (manager)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/workers", workers::router())
        .nest("/records", records::router())
        .nest("/orders", orders::router())
        .nest("/export", export::router())
        .nest("/users", users::router())
}
