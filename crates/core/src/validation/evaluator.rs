//! Rule evaluator — pure logic, no database access.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use super::rules::{FieldRule, UniqueProbe, ValidationReport};
use super::rulesets::{field_label, Ruleset};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
});
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[1-9][0-9]{0,15}$").unwrap());
static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").unwrap());
static LINKEDIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://(www\.)?linkedin\.com/(in|pub|profile)/[a-zA-Z0-9-]+/?$").unwrap()
});
static GITHUB_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://(www\.)?github\.com/[a-zA-Z0-9-]+/?$").unwrap()
});
static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_]{3,20}$").unwrap());
static YEAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(19|20)[0-9]{2}$").unwrap());
static POSTAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{5}(-[0-9]{4})?$|^[A-Z0-9]{3}\s?[A-Z0-9]{3}$").unwrap()
});

/// Minimum password length accepted by [`FieldRule::Password`].
const MIN_PASSWORD_LEN: usize = 8;

/// Evaluate a ruleset against a submitted field map.
///
/// Each field's value is trimmed before checking. Rules run in declared
/// order and the first failure short-circuits the rest of that field's
/// rules, so at most one error is reported per field. Uniqueness rules are
/// emitted as [`UniqueProbe`]s instead of being checked here.
pub fn evaluate(fields: &HashMap<String, String>, rules: Ruleset) -> ValidationReport {
    let mut report = ValidationReport::default();

    for (field, field_rules) in rules {
        let value = fields.get(*field).map(|v| v.trim()).unwrap_or("");

        for rule in *field_rules {
            if let Some(kind) = rule.uniqueness_kind() {
                if !value.is_empty() {
                    report.probes.push(UniqueProbe {
                        field: (*field).to_string(),
                        kind,
                        value: value.to_string(),
                    });
                }
                continue;
            }

            if let Some(message) = check_rule(*rule, field, value, fields) {
                report.fail(field, message);
                break;
            }
        }
    }

    report
}

/// Check one pure rule; returns the error message on failure.
fn check_rule(
    rule: FieldRule,
    field: &str,
    value: &str,
    fields: &HashMap<String, String>,
) -> Option<String> {
    // Empty-after-trim is "absent" for everything except Required.
    if value.is_empty() {
        return match rule {
            FieldRule::Required => Some(format!("{} is required", field_label(field))),
            _ => None,
        };
    }

    match rule {
        FieldRule::Required => None,
        FieldRule::Email => (!EMAIL_RE.is_match(value))
            .then(|| "Please enter a valid email address".to_string()),
        FieldRule::Phone => {
            (!PHONE_RE.is_match(value)).then(|| "Please enter a valid phone number".to_string())
        }
        FieldRule::Url => (!URL_RE.is_match(value)).then(|| "Please enter a valid URL".to_string()),
        FieldRule::LinkedinUrl => (!LINKEDIN_RE.is_match(value))
            .then(|| "Please enter a valid LinkedIn profile URL".to_string()),
        FieldRule::GithubUrl => (!GITHUB_RE.is_match(value))
            .then(|| "Please enter a valid GitHub profile URL".to_string()),
        FieldRule::Username => (!USERNAME_RE.is_match(value)).then(|| {
            "Username must be 3-20 characters long and contain only letters, numbers, \
             and underscores"
                .to_string()
        }),
        FieldRule::Password => (value.chars().count() < MIN_PASSWORD_LEN)
            .then(|| format!("Password must be at least {MIN_PASSWORD_LEN} characters long")),
        FieldRule::ConfirmPassword => {
            let password = fields.get("password").map(|v| v.trim()).unwrap_or("");
            (value != password).then(|| "Passwords do not match".to_string())
        }
        FieldRule::Numeric => (!value.chars().all(|c| c.is_ascii_digit()))
            .then(|| format!("{} must be a number", field_label(field))),
        FieldRule::Year => {
            (!YEAR_RE.is_match(value)).then(|| "Please enter a valid year (e.g., 2024)".to_string())
        }
        FieldRule::PostalCode => (!POSTAL_RE.is_match(value))
            .then(|| "Please enter a valid postal code".to_string()),
        FieldRule::MinLength(min) => (value.chars().count() < min).then(|| {
            format!(
                "{} must be at least {min} characters long",
                field_label(field)
            )
        }),
        FieldRule::MaxLength(max) => (value.chars().count() > max).then(|| {
            format!(
                "{} must be no more than {max} characters long",
                field_label(field)
            )
        }),
        FieldRule::MinValue(min) => {
            let ok = value.parse::<i64>().is_ok_and(|n| n >= min);
            (!ok).then(|| format!("{} must be at least {min}", field_label(field)))
        }
        FieldRule::MaxValue(max) => {
            let ok = value.parse::<i64>().is_ok_and(|n| n <= max);
            (!ok).then(|| format!("{} must be no more than {max}", field_label(field)))
        }
        FieldRule::UniqueEmail | FieldRule::UniqueUsername | FieldRule::UniquePhone => {
            unreachable!("uniqueness rules are handled by the evaluate loop")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::rules::UniqueKind;
    use crate::validation::rulesets::{ruleset, FormKind};
    use FieldRule::*;

    fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn required_fails_on_missing_field() {
        let rules: Ruleset = &[("email", &[Required, Email])];
        let report = evaluate(&fields(&[]), rules);
        assert!(!report.valid);
        assert_eq!(report.errors["email"], "Email is required");
    }

    #[test]
    fn required_fails_on_whitespace_only() {
        let rules: Ruleset = &[("first_name", &[Required, MinLength(2)])];
        let report = evaluate(&fields(&[("first_name", "   ")]), rules);
        assert!(!report.valid);
        assert_eq!(report.errors["first_name"], "First Name is required");
    }

    #[test]
    fn first_failure_short_circuits_remaining_rules() {
        // Required fails, so MinLength never produces a second message.
        let rules: Ruleset = &[("first_name", &[Required, MinLength(2), MaxLength(50)])];
        let report = evaluate(&fields(&[("first_name", "")]), rules);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors["first_name"].contains("required"));
    }

    #[test]
    fn empty_optional_value_skips_format_rules() {
        let rules: Ruleset = &[("linkedin_url", &[LinkedinUrl])];
        let report = evaluate(&fields(&[("linkedin_url", "")]), rules);
        assert!(report.valid);
    }

    #[test]
    fn email_pattern_accepts_and_rejects() {
        let rules: Ruleset = &[("email", &[Email])];
        for good in ["a@b.co", "jane.doe+hr@acme-corp.com", "x_1%2@sub.domain.org"] {
            let report = evaluate(&fields(&[("email", good)]), rules);
            assert!(report.valid, "expected {good} to validate");
        }
        for bad in ["plainaddress", "missing@tld", "@acme.com", "a@b.c", "a b@c.com"] {
            let report = evaluate(&fields(&[("email", bad)]), rules);
            assert!(!report.valid, "expected {bad} to fail");
            assert_eq!(report.errors["email"], "Please enter a valid email address");
        }
    }

    #[test]
    fn empty_form_reports_every_required_field() {
        let report = evaluate(&HashMap::new(), ruleset(FormKind::CandidateRegister));
        assert!(!report.valid);
        for field in [
            "first_name",
            "last_name",
            "email",
            "phone",
            "password",
            "confirm_password",
        ] {
            assert!(
                report.errors[field].contains("is required"),
                "missing required error for {field}"
            );
        }
        assert_eq!(report.errors.len(), 6);
        assert!(report.probes.is_empty(), "no probes for empty values");
    }

    #[test]
    fn values_are_trimmed_before_checks() {
        let rules: Ruleset = &[("email", &[Required, Email])];
        let report = evaluate(&fields(&[("email", "  jane@acme.com  ")]), rules);
        assert!(report.valid);
    }

    #[test]
    fn confirm_password_compares_sibling_field() {
        let rules: Ruleset = &[("confirm_password", &[Required, ConfirmPassword])];

        let matching = fields(&[("password", "s3cretpass"), ("confirm_password", "s3cretpass")]);
        assert!(evaluate(&matching, rules).valid);

        let differing = fields(&[("password", "s3cretpass"), ("confirm_password", "other")]);
        let report = evaluate(&differing, rules);
        assert_eq!(report.errors["confirm_password"], "Passwords do not match");
    }

    #[test]
    fn numeric_and_bounds() {
        let rules: Ruleset = &[("duration", &[Required, Numeric, MinValue(5), MaxValue(180)])];

        assert!(evaluate(&fields(&[("duration", "60")]), rules).valid);

        let report = evaluate(&fields(&[("duration", "abc")]), rules);
        assert_eq!(report.errors["duration"], "Duration must be a number");

        let report = evaluate(&fields(&[("duration", "3")]), rules);
        assert_eq!(report.errors["duration"], "Duration must be at least 5");

        let report = evaluate(&fields(&[("duration", "500")]), rules);
        assert_eq!(report.errors["duration"], "Duration must be no more than 180");
    }

    #[test]
    fn year_and_postal_code_patterns() {
        let rules: Ruleset = &[("founded_year", &[Year]), ("postal_code", &[PostalCode])];

        let ok = fields(&[("founded_year", "2019"), ("postal_code", "94103")]);
        assert!(evaluate(&ok, rules).valid);

        let bad = fields(&[("founded_year", "1870"), ("postal_code", "94")]);
        let report = evaluate(&bad, rules);
        assert_eq!(report.errors.len(), 2);
    }

    #[test]
    fn uniqueness_emits_probe_only_after_pure_rules_pass() {
        let rules: Ruleset = &[("email", &[Required, Email, UniqueEmail])];

        let report = evaluate(&fields(&[("email", "jane@acme.com")]), rules);
        assert!(report.valid);
        assert_eq!(
            report.probes,
            vec![UniqueProbe {
                field: "email".to_string(),
                kind: UniqueKind::Email,
                value: "jane@acme.com".to_string(),
            }]
        );

        // Malformed email fails before the probe is reached.
        let report = evaluate(&fields(&[("email", "not-an-email")]), rules);
        assert!(!report.valid);
        assert!(report.probes.is_empty());
    }

    #[test]
    fn login_ruleset_accepts_any_nonempty_credentials() {
        let report = evaluate(
            &fields(&[("username", "jane"), ("password", "pw")]),
            ruleset(FormKind::Login),
        );
        assert!(report.valid);
    }

    #[test]
    fn max_length_counts_chars_not_bytes() {
        let rules: Ruleset = &[("bio", &[MaxLength(4)])];
        let report = evaluate(&fields(&[("bio", "héllo")]), rules);
        assert!(!report.valid);
        let report = evaluate(&fields(&[("bio", "héll")]), rules);
        assert!(report.valid);
    }
}
