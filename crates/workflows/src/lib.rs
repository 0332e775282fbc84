//! Orchestration workflows over the store and the notification gateway.
//!
//! - [`registration`] — the HR registration/approval state machine.
//! - [`decision`] — candidate-facing technical interview decision emails.
//! - [`messaging`] — peer-to-peer messaging with inbox aggregation.
//! - [`validation`] — the form validator, resolving store-backed
//!   uniqueness probes on top of the pure rules engine.
//! - [`password`] — Argon2id hashing shared by account provisioning and
//!   login verification.
//!
//! Every public workflow operation recovers its own faults at the
//! boundary: callers receive structured outcomes, never raw errors.

pub mod decision;
pub mod messaging;
pub mod password;
pub mod registration;
pub mod validation;

use ez2hire_core::types::DbId;

/// Narrow error set for workflow internals. Public workflow entry points
/// convert these into structured failure outcomes before returning.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Password hashing failed: {0}")]
    Hash(String),
}
