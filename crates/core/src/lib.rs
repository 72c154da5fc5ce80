//! Domain types and pure logic for the stitchtrack production tracker.
//!
//! This crate is I/O-free: records, flag semantics, permissive numeric
//! parsing, and the order summary pass all live here so the persistence and
//! HTTP layers stay thin.

pub mod error;
pub mod parse;
pub mod record;
pub mod roles;
pub mod summary;
pub mod types;
