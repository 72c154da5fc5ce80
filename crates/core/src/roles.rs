//! Well-known role name constants.
//!
//! These must match the `role` field stored in the users file.

pub const ROLE_MANAGER: &str = "manager";
pub const ROLE_COLLABORATOR: &str = "collaborator";
