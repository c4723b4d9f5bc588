//! Domain model for schemes and their ordered steps.
//!
//! # Responsibility
//! - Define the canonical record shapes moved between callers and storage.
//! - Keep insert/update payloads separate from materialized rows, because
//!   row identifiers exist only after the engine assigns them.
//!
//! # Invariants
//! - Every materialized record carries an engine-generated `id`.
//! - Steps always belong to exactly one scheme.

pub mod scheme;
pub mod step;
