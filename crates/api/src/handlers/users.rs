//! Handlers for the `/users` resource (manager-only user administration).
//!
//! Collaborator accounts are linked to the Worker Registry through their
//! display name: creating one auto-registers the name, deleting one removes
//! the name again unless production records still reference it.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use stitchtrack_core::error::CoreError;
use stitchtrack_core::roles::{ROLE_COLLABORATOR, ROLE_MANAGER};
use stitchtrack_store::User;
use validator::Validate;

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireManager;
use crate::state::AppState;

/// Minimum password length enforced on user creation.
const MIN_PASSWORD_LENGTH: usize = 8;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /users`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, message = "username must not be empty"))]
    pub username: String,
    pub password: String,
    #[validate(length(min = 1, message = "display_name must not be empty"))]
    pub display_name: String,
    /// Defaults to `collaborator` when omitted, like the legacy system.
    #[serde(default = "default_role")]
    pub role: String,
}

fn default_role() -> String {
    ROLE_COLLABORATOR.to_string()
}

/// Public view of a user, safe to return (no hash).
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub username: String,
    pub role: String,
    pub display_name: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/users
///
/// List all users without their password hashes.
pub async fn list_users(
    State(state): State<AppState>,
    RequireManager(_manager): RequireManager,
) -> AppResult<Json<Vec<UserResponse>>> {
    let store = state.store.read().await;
    let users = store.load_users()?;

    let responses = users
        .iter()
        .map(|(username, user)| UserResponse {
            username: username.clone(),
            role: user.role.clone(),
            display_name: user.display_name.clone(),
        })
        .collect();

    Ok(Json(responses))
}

/// POST /api/v1/users
///
/// Create a user. Hashes the password, and for collaborators registers the
/// display name as a worker if it is not in the registry yet.
pub async fn create_user(
    State(state): State<AppState>,
    RequireManager(_manager): RequireManager,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    if input.role != ROLE_MANAGER && input.role != ROLE_COLLABORATOR {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Unknown role '{}'",
            input.role
        ))));
    }

    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let hashed = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let store = state.store.write().await;
    let mut users = store.load_users()?;

    if users.contains_key(&input.username) {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "User '{}' already exists",
            input.username
        ))));
    }

    users.insert(
        input.username.clone(),
        User {
            password_hash: hashed,
            role: input.role.clone(),
            display_name: input.display_name.clone(),
        },
    );
    store.save_users(&users)?;

    // Collaborators double as workers: make sure the registry knows the name.
    if input.role == ROLE_COLLABORATOR {
        let mut workers = store.load_workers()?;
        if !workers.iter().any(|w| w == &input.display_name) {
            workers.push(input.display_name.clone());
            store.save_workers(&workers)?;
            tracing::info!(worker = %input.display_name, "Collaborator auto-registered as worker");
        }
    }

    tracing::info!(username = %input.username, role = %input.role, "User created");
    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            username: input.username,
            role: input.role,
            display_name: input.display_name,
        }),
    ))
}

/// DELETE /api/v1/users/{username}
///
/// Delete a user. For collaborators the display name also leaves the Worker
/// Registry, but only when no production record references it -- the same
/// reference check that guards direct worker deletion.
pub async fn delete_user(
    State(state): State<AppState>,
    RequireManager(_manager): RequireManager,
    Path(username): Path<String>,
) -> AppResult<StatusCode> {
    let store = state.store.write().await;
    let mut users = store.load_users()?;

    let user = users
        .shift_remove(&username)
        .ok_or_else(|| CoreError::not_found("User", &username))?;
    store.save_users(&users)?;

    if user.role == ROLE_COLLABORATOR {
        let records = store.load_records()?;
        let referenced = records
            .records
            .iter()
            .any(|r| r.worker == user.display_name);

        if !referenced {
            let mut workers = store.load_workers()?;
            let before = workers.len();
            workers.retain(|w| w != &user.display_name);
            if workers.len() != before {
                store.save_workers(&workers)?;
                tracing::info!(worker = %user.display_name, "Worker removed with collaborator");
            }
        } else {
            tracing::info!(
                worker = %user.display_name,
                "Worker kept: production records still reference the name"
            );
        }
    }

    tracing::info!(username = %username, "User deleted");
    Ok(StatusCode::NO_CONTENT)
}
