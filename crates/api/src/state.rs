use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::ServerConfig;
use stitchtrack_store::JsonStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`). The store lock
/// serializes load-modify-save cycles: mutating handlers hold the write half
/// for the whole cycle so two concurrent writers can never interleave and
/// drop each other's changes.
#[derive(Clone)]
pub struct AppState {
    /// JSON file store behind a read/write lock.
    pub store: Arc<RwLock<JsonStore>>,
    /// Server configuration (JWT settings, CORS, data dir).
    pub config: Arc<ServerConfig>,
}
