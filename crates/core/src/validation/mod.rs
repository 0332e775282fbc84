//! Form validation engine.
//!
//! A closed set of field rules, named per-form rulesets, and a pure
//! evaluator with first-failure-per-field short-circuiting. Uniqueness
//! rules cannot be resolved without the user store; the evaluator emits
//! them as probes for a store-backed caller to settle.

pub mod evaluator;
pub mod rules;
pub mod rulesets;
