//! Scheme domain model.
//!
//! # Responsibility
//! - Define the scheme record plus its insert and partial-update payloads.
//!
//! # Invariants
//! - `id` is assigned by the storage engine on insert and never reused.
//! - `SchemeChanges` with no fields set leaves the row untouched.

use serde::{Deserialize, Serialize};

/// Engine-generated row identifier for schemes.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type SchemeId = i64;

/// Materialized scheme row as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scheme {
    /// Engine-generated primary key.
    pub id: SchemeId,
    /// Human-readable plan name.
    pub scheme_name: String,
}

/// Insert payload for a new scheme.
///
/// Carries no `id`; identifiers come exclusively from the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewScheme {
    pub scheme_name: String,
}

impl NewScheme {
    pub fn new(scheme_name: impl Into<String>) -> Self {
        Self {
            scheme_name: scheme_name.into(),
        }
    }
}

/// Partial-update payload for an existing scheme.
///
/// Unset fields keep their persisted value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemeChanges {
    pub scheme_name: Option<String>,
}

impl SchemeChanges {
    /// Changes that replace the scheme name only.
    pub fn rename(scheme_name: impl Into<String>) -> Self {
        Self {
            scheme_name: Some(scheme_name.into()),
        }
    }

    /// Returns whether no field is set.
    pub fn is_empty(&self) -> bool {
        self.scheme_name.is_none()
    }
}
