//! Persisted user directory types.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One user account. The map key (username) is not repeated inside.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Argon2id hash in PHC string format.
    pub password_hash: String,
    /// `"manager"` or `"collaborator"` (see `stitchtrack_core::roles`).
    pub role: String,
    /// Human name shown in the UI; for collaborators this is also the
    /// Worker Registry entry.
    pub display_name: String,
}

/// The user directory, keyed by username. Insertion order is preserved so
/// listings are stable across load/save cycles.
pub type UserMap = IndexMap<String, User>;
