//! Named per-form rulesets and field display names.

use super::rules::FieldRule::{self, *};

/// The forms the platform validates server-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    CandidateRegister,
    CandidateProfile,
    UserInvitation,
    OrganizationCreate,
    Login,
    InterviewCreate,
    JobPosting,
}

impl FormKind {
    /// Parse the URL-facing form name. Unknown names are a caller error,
    /// not an empty ruleset.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "candidate_register" => Some(Self::CandidateRegister),
            "candidate_profile" => Some(Self::CandidateProfile),
            "user_invitation" => Some(Self::UserInvitation),
            "organization_create" => Some(Self::OrganizationCreate),
            "login" => Some(Self::Login),
            "interview_create" => Some(Self::InterviewCreate),
            "job_posting" => Some(Self::JobPosting),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::CandidateRegister => "candidate_register",
            Self::CandidateProfile => "candidate_profile",
            Self::UserInvitation => "user_invitation",
            Self::OrganizationCreate => "organization_create",
            Self::Login => "login",
            Self::InterviewCreate => "interview_create",
            Self::JobPosting => "job_posting",
        }
    }
}

/// An ordered (field, rules) table. Uniqueness rules must come last within
/// a field's rule list: the pure evaluator only emits a probe once every
/// preceding rule has passed.
pub type Ruleset = &'static [(&'static str, &'static [FieldRule])];

/// The declared ruleset for a form.
pub fn ruleset(kind: FormKind) -> Ruleset {
    match kind {
        FormKind::CandidateRegister => &[
            ("first_name", &[Required, MinLength(2), MaxLength(50)]),
            ("last_name", &[Required, MinLength(2), MaxLength(50)]),
            ("email", &[Required, Email, UniqueEmail]),
            ("phone", &[Required, Phone, UniquePhone]),
            ("password", &[Required, Password]),
            ("confirm_password", &[Required, ConfirmPassword]),
        ],
        FormKind::CandidateProfile => &[
            ("first_name", &[Required, MinLength(2), MaxLength(50)]),
            ("last_name", &[Required, MinLength(2), MaxLength(50)]),
            ("email", &[Required, Email]),
            ("phone", &[Required, Phone]),
            ("bio", &[MaxLength(1000)]),
            ("skills", &[MaxLength(500)]),
            ("experience", &[MaxLength(2000)]),
            ("education", &[MaxLength(1000)]),
            ("linkedin_url", &[LinkedinUrl]),
            ("github_url", &[GithubUrl]),
            ("portfolio_url", &[Url]),
            ("salary_expectation", &[Required]),
        ],
        FormKind::UserInvitation => &[
            ("first_name", &[Required, MinLength(2), MaxLength(50)]),
            ("last_name", &[Required, MinLength(2), MaxLength(50)]),
            ("email", &[Required, Email, UniqueEmail]),
            ("phone", &[Phone]),
            ("role", &[Required]),
        ],
        FormKind::OrganizationCreate => &[
            ("name", &[Required, MinLength(2), MaxLength(100)]),
            ("description", &[MaxLength(1000)]),
            ("website", &[Url]),
            ("industry", &[MaxLength(100)]),
            ("size", &[MaxLength(50)]),
            ("founded_year", &[Year]),
            ("address", &[MaxLength(200)]),
            ("city", &[MaxLength(100)]),
            ("state", &[MaxLength(100)]),
            ("country", &[MaxLength(100)]),
            ("postal_code", &[PostalCode]),
        ],
        FormKind::Login => &[
            ("username", &[Required]),
            ("password", &[Required]),
        ],
        FormKind::InterviewCreate => &[
            ("title", &[Required, MinLength(3), MaxLength(200)]),
            ("description", &[MaxLength(1000)]),
            ("duration", &[Required, Numeric, MinValue(5), MaxValue(180)]),
        ],
        FormKind::JobPosting => &[
            ("title", &[Required, MinLength(3), MaxLength(200)]),
            ("description", &[Required, MinLength(50), MaxLength(5000)]),
            ("requirements", &[MaxLength(2000)]),
            ("benefits", &[MaxLength(1000)]),
            ("salary_min", &[Numeric, MinValue(0)]),
            ("salary_max", &[Numeric, MinValue(0)]),
            ("location", &[Required, MaxLength(100)]),
            ("job_type", &[Required]),
            ("experience_level", &[Required]),
        ],
    }
}

/// Human-readable label for a field, used in error messages.
pub fn field_label(field: &str) -> String {
    match field {
        "first_name" => "First Name".to_string(),
        "last_name" => "Last Name".to_string(),
        "email" => "Email".to_string(),
        "phone" => "Phone Number".to_string(),
        "password" => "Password".to_string(),
        "confirm_password" => "Confirm Password".to_string(),
        "bio" => "Bio".to_string(),
        "skills" => "Skills".to_string(),
        "experience" => "Experience".to_string(),
        "education" => "Education".to_string(),
        "linkedin_url" => "LinkedIn URL".to_string(),
        "github_url" => "GitHub URL".to_string(),
        "portfolio_url" => "Portfolio URL".to_string(),
        "salary_expectation" => "Salary Expectation".to_string(),
        "name" => "Organization Name".to_string(),
        "job_title" => "Job Title".to_string(),
        "location" => "Location".to_string(),
        "username" => "Username".to_string(),
        "website" => "Website".to_string(),
        "description" => "Description".to_string(),
        "industry" => "Industry".to_string(),
        "size" => "Company Size".to_string(),
        "founded_year" => "Founded Year".to_string(),
        "address" => "Address".to_string(),
        "city" => "City".to_string(),
        "state" => "State".to_string(),
        "country" => "Country".to_string(),
        "postal_code" => "Postal Code".to_string(),
        other => title_case(other),
    }
}

/// Fallback label: `"salary_min"` -> `"Salary Min"`.
fn title_case(field: &str) -> String {
    field
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips() {
        for kind in [
            FormKind::CandidateRegister,
            FormKind::CandidateProfile,
            FormKind::UserInvitation,
            FormKind::OrganizationCreate,
            FormKind::Login,
            FormKind::InterviewCreate,
            FormKind::JobPosting,
        ] {
            assert_eq!(FormKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(FormKind::parse("no_such_form"), None);
    }

    #[test]
    fn uniqueness_rules_are_terminal() {
        for kind in [
            FormKind::CandidateRegister,
            FormKind::CandidateProfile,
            FormKind::UserInvitation,
            FormKind::OrganizationCreate,
            FormKind::Login,
            FormKind::InterviewCreate,
            FormKind::JobPosting,
        ] {
            for (field, rules) in ruleset(kind) {
                if let Some(pos) = rules.iter().position(|r| r.uniqueness_kind().is_some()) {
                    assert_eq!(
                        pos,
                        rules.len() - 1,
                        "uniqueness rule must be last for {field} in {kind:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn known_labels() {
        assert_eq!(field_label("linkedin_url"), "LinkedIn URL");
        assert_eq!(field_label("postal_code"), "Postal Code");
    }

    #[test]
    fn fallback_label_title_cases() {
        assert_eq!(field_label("salary_min"), "Salary Min");
        assert_eq!(field_label("custom"), "Custom");
    }
}
