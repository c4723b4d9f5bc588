//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep consumer layers decoupled from storage details.

pub mod scheme_service;
