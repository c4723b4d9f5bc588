//! Scheme use-case service.
//!
//! # Responsibility
//! - Provide stable entry points for scheme and step use-cases.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository persistence contracts.
//! - Service layer remains storage-agnostic.

use crate::model::scheme::{NewScheme, Scheme, SchemeChanges, SchemeId};
use crate::model::step::{NewStep, SchemeStep, Step};
use crate::repo::scheme_repo::{RepoResult, SchemeRepository};

/// Use-case service wrapper for scheme data access.
pub struct SchemeService<R: SchemeRepository> {
    repo: R,
}

impl<R: SchemeRepository> SchemeService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists all schemes without their steps.
    pub fn list_schemes(&self) -> RepoResult<Vec<Scheme>> {
        self.repo.find()
    }

    /// Gets one scheme by id.
    pub fn get_scheme(&self, id: SchemeId) -> RepoResult<Option<Scheme>> {
        self.repo.find_by_id(id)
    }

    /// Lists a scheme's steps in display order, scheme name attached.
    pub fn list_steps(&self, scheme_id: SchemeId) -> RepoResult<Vec<SchemeStep>> {
        self.repo.find_steps(scheme_id)
    }

    /// Creates a scheme and returns the materialized row.
    pub fn create_scheme(&self, scheme_name: impl Into<String>) -> RepoResult<Scheme> {
        self.repo.add(&NewScheme::new(scheme_name))
    }

    /// Renames one scheme; unknown ids yield `None`.
    pub fn rename_scheme(
        &self,
        id: SchemeId,
        scheme_name: impl Into<String>,
    ) -> RepoResult<Option<Scheme>> {
        self.repo.update(&SchemeChanges::rename(scheme_name), id)
    }

    /// Deletes one scheme and returns its last persisted state, or `None`
    /// when the id matches nothing.
    pub fn delete_scheme(&self, id: SchemeId) -> RepoResult<Option<Scheme>> {
        self.repo.remove(id)
    }

    /// Appends a step to an existing scheme.
    pub fn append_step(
        &self,
        scheme_id: SchemeId,
        step_number: i64,
        instructions: impl Into<String>,
    ) -> RepoResult<Step> {
        self.repo
            .add_step(&NewStep::new(step_number, instructions), scheme_id)
    }
}
