//! Flat-file JSON persistence for the stitchtrack collections.
//!
//! Three files under one data directory: `records.json`, `workers.json`,
//! `users.json`. Every mutation is a load-full / modify / save-full cycle;
//! the API layer serializes those cycles behind a lock. Writes go to a
//! temporary sibling file and are renamed into place, so a crash mid-write
//! never leaves a truncated collection behind.

pub mod error;
pub mod store;
pub mod user;

pub use error::StoreError;
pub use store::{JsonStore, RecordsFile};
pub use user::{User, UserMap};
