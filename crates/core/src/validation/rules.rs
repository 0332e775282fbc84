//! Validation rule and result types.

use std::collections::BTreeMap;

use serde::Serialize;

/// A single validation rule attached to a form field.
///
/// Rules for one field evaluate in declared order; the first failing rule
/// produces that field's (only) error message. Values are trimmed before
/// every check, and an empty-after-trim value is treated as absent by every
/// rule except [`FieldRule::Required`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    Required,
    Email,
    Phone,
    Url,
    LinkedinUrl,
    GithubUrl,
    Username,
    Password,
    /// Must equal the submitted `password` field of the same form.
    ConfirmPassword,
    Numeric,
    Year,
    PostalCode,
    MinLength(usize),
    MaxLength(usize),
    MinValue(i64),
    MaxValue(i64),
    UniqueEmail,
    UniqueUsername,
    UniquePhone,
}

impl FieldRule {
    /// If this rule is a store-backed uniqueness check, which column it probes.
    pub fn uniqueness_kind(self) -> Option<UniqueKind> {
        match self {
            Self::UniqueEmail => Some(UniqueKind::Email),
            Self::UniqueUsername => Some(UniqueKind::Username),
            Self::UniquePhone => Some(UniqueKind::Phone),
            _ => None,
        }
    }
}

/// Which user-table column a uniqueness probe checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueKind {
    Email,
    Username,
    Phone,
}

impl UniqueKind {
    /// Error message reported when the probed value is already taken.
    pub fn taken_message(self) -> &'static str {
        match self {
            Self::Email => "This email address is already registered",
            Self::Username => "This username is already taken",
            Self::Phone => "This phone number is already registered",
        }
    }
}

/// A store lookup the pure evaluator cannot perform itself. Emitted only
/// for non-empty values whose preceding pure rules all passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniqueProbe {
    pub field: String,
    pub kind: UniqueKind,
    pub value: String,
}

/// Result of evaluating a ruleset against a submitted field map.
///
/// `valid` covers the pure rules only; callers that resolve `probes` must
/// fold probe failures in before reporting to the client.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    /// field name -> first failing rule's message.
    pub errors: BTreeMap<String, String>,
    #[serde(skip)]
    pub probes: Vec<UniqueProbe>,
}

impl ValidationReport {
    pub fn fail(&mut self, field: &str, message: impl Into<String>) {
        self.errors.insert(field.to_string(), message.into());
        self.valid = false;
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self {
            valid: true,
            errors: BTreeMap::new(),
            probes: Vec::new(),
        }
    }
}
