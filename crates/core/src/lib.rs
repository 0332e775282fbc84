//! Ez2Hire domain core.
//!
//! Pure domain logic shared by every other crate in the workspace: id and
//! timestamp aliases, the error taxonomy, role and decision vocabularies,
//! the form validation rules engine, and the HR registration heuristics.
//! This crate performs no I/O.

pub mod decision;
pub mod error;
pub mod registration;
pub mod roles;
pub mod types;
pub mod validation;
