//! First-run seeding of the user directory.
//!
//! A fresh data directory has no users at all, which would make the service
//! impossible to log into. Startup therefore seeds one manager and one
//! collaborator account with well-known passwords, exactly once.

use stitchtrack_core::roles::{ROLE_COLLABORATOR, ROLE_MANAGER};
use stitchtrack_store::{JsonStore, User};

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};

pub const DEFAULT_MANAGER_USERNAME: &str = "manager";
pub const DEFAULT_MANAGER_PASSWORD: &str = "admin123";
pub const DEFAULT_COLLABORATOR_USERNAME: &str = "collaborator";
pub const DEFAULT_COLLABORATOR_PASSWORD: &str = "colab123";

/// Seed the default accounts when the directory is empty.
///
/// Returns `true` when seeding happened. Does nothing (and touches no file)
/// when any user already exists.
pub fn seed_default_users(store: &JsonStore) -> AppResult<bool> {
    let mut users = store.load_users()?;
    if !users.is_empty() {
        return Ok(false);
    }

    users.insert(
        DEFAULT_MANAGER_USERNAME.to_string(),
        User {
            password_hash: hash(DEFAULT_MANAGER_PASSWORD)?,
            role: ROLE_MANAGER.to_string(),
            display_name: "Manager".to_string(),
        },
    );
    users.insert(
        DEFAULT_COLLABORATOR_USERNAME.to_string(),
        User {
            password_hash: hash(DEFAULT_COLLABORATOR_PASSWORD)?,
            role: ROLE_COLLABORATOR.to_string(),
            display_name: "Collaborator".to_string(),
        },
    );
    store.save_users(&users)?;

    tracing::warn!("Seeded default accounts; change their passwords before going live");
    Ok(true)
}

fn hash(password: &str) -> AppResult<String> {
    hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))
}
