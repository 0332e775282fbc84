//! Store-backed form validation.
//!
//! Runs the pure rules engine, then resolves its uniqueness probes against
//! the user table and folds any failures into the report. Uniqueness is
//! checked globally across tenants: these rules run pre-registration,
//! before any organization context exists.

use std::collections::HashMap;

use ez2hire_core::validation::evaluator::evaluate;
use ez2hire_core::validation::rules::{UniqueKind, ValidationReport};
use ez2hire_core::validation::rulesets::{ruleset, FormKind};
use ez2hire_db::repositories::UserRepo;
use ez2hire_db::DbPool;

/// Validates submitted forms against their declared rulesets.
pub struct FormValidator {
    pool: DbPool,
}

impl FormValidator {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Validate a form. The returned report's `valid` flag reflects both
    /// the pure rules and the resolved uniqueness probes.
    pub async fn validate(
        &self,
        kind: FormKind,
        fields: &HashMap<String, String>,
    ) -> Result<ValidationReport, sqlx::Error> {
        let mut report = evaluate(fields, ruleset(kind));

        let probes = std::mem::take(&mut report.probes);
        for probe in probes {
            // A field that already failed a pure rule keeps its first error.
            if report.errors.contains_key(&probe.field) {
                continue;
            }
            let taken = match probe.kind {
                UniqueKind::Email => UserRepo::email_exists(&self.pool, &probe.value).await?,
                UniqueKind::Username => UserRepo::username_exists(&self.pool, &probe.value).await?,
                UniqueKind::Phone => UserRepo::phone_exists(&self.pool, &probe.value).await?,
            };
            if taken {
                report.fail(&probe.field, probe.kind.taken_message());
            }
        }

        Ok(report)
    }
}
