//! Step domain model and the joined step view.
//!
//! # Responsibility
//! - Define the step record, its insert payload and the denormalized
//!   read model used when listing a scheme's steps.
//!
//! # Invariants
//! - `step_number` determines display order within a scheme; this layer
//!   never re-numbers steps.
//! - `SchemeStep` exposes the owning scheme's name instead of `scheme_id`.

use crate::model::scheme::SchemeId;
use serde::{Deserialize, Serialize};

/// Engine-generated row identifier for steps.
pub type StepId = i64;

/// Materialized step row as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Engine-generated primary key.
    pub id: StepId,
    /// Owning scheme.
    pub scheme_id: SchemeId,
    /// Position of this step within its scheme.
    pub step_number: i64,
    /// Instruction text for this step.
    pub instructions: String,
}

/// Insert payload for a new step.
///
/// The owning scheme id is supplied separately on insert and merged into
/// the row as its foreign key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStep {
    pub step_number: i64,
    pub instructions: String,
}

impl NewStep {
    pub fn new(step_number: i64, instructions: impl Into<String>) -> Self {
        Self {
            step_number,
            instructions: instructions.into(),
        }
    }
}

/// Read model for a step joined with its owning scheme.
///
/// Deliberately omits `scheme_id`; the scheme is identified by name in
/// this shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemeStep {
    pub id: StepId,
    pub scheme_name: String,
    pub step_number: i64,
    pub instructions: String,
}
