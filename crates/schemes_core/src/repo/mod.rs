//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the data-access contract for schemes and steps.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - "Nothing matched" is an absent value, never an error.
//! - Storage failures always surface as typed errors to the caller.

pub mod scheme_repo;
