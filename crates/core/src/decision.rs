//! Closed vocabularies for interview decisions and registration outcomes.
//!
//! The platform stores these as strings; parsing happens once at the edge
//! so workflow dispatch is an exhaustive enum match rather than string
//! comparison scattered through the code.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Decision
// ---------------------------------------------------------------------------

/// Outcome recorded by the technical interviewer on a feedback row.
///
/// Only [`Decision::Selected`] and [`Decision::Rejected`] are candidate-facing;
/// every other stored value (including `second_round`) means "no candidate
/// notification yet".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Selected,
    Rejected,
    SecondRound,
}

impl Decision {
    /// Parse a stored decision value. Unknown values return `None` rather
    /// than an error: the notification workflow treats them as "no action".
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "selected" => Some(Self::Selected),
            "rejected" => Some(Self::Rejected),
            "second_round" => Some(Self::SecondRound),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Selected => "selected",
            Self::Rejected => "rejected",
            Self::SecondRound => "second_round",
        }
    }

    /// Whether this decision triggers a candidate-facing email.
    pub fn is_candidate_facing(self) -> bool {
        matches!(self, Self::Selected | Self::Rejected)
    }
}

// ---------------------------------------------------------------------------
// RegistrationAction
// ---------------------------------------------------------------------------

/// The action field returned to the caller of the HR registration workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationAction {
    /// A duplicate account exists; the applicant must contact support.
    ContactSupport,
    /// The email domain failed the corporate-domain check.
    VerifyEmail,
    /// The request was forwarded to org admins or the platform super-admin.
    WaitApproval,
    /// The applicant was auto-provisioned into the Guest Organization.
    GuestAssignment,
}

impl RegistrationAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ContactSupport => "contact_support",
            Self::VerifyEmail => "verify_email",
            Self::WaitApproval => "wait_approval",
            Self::GuestAssignment => "guest_assignment",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_decisions() {
        assert_eq!(Decision::parse("selected"), Some(Decision::Selected));
        assert_eq!(Decision::parse("rejected"), Some(Decision::Rejected));
        assert_eq!(Decision::parse("second_round"), Some(Decision::SecondRound));
    }

    #[test]
    fn parse_unknown_decision_is_none() {
        assert_eq!(Decision::parse("maybe"), None);
        assert_eq!(Decision::parse(""), None);
        assert_eq!(Decision::parse("SELECTED"), None);
    }

    #[test]
    fn only_terminal_decisions_are_candidate_facing() {
        assert!(Decision::Selected.is_candidate_facing());
        assert!(Decision::Rejected.is_candidate_facing());
        assert!(!Decision::SecondRound.is_candidate_facing());
    }

    #[test]
    fn round_trip_as_str() {
        for d in [Decision::Selected, Decision::Rejected, Decision::SecondRound] {
            assert_eq!(Decision::parse(d.as_str()), Some(d));
        }
    }

    #[test]
    fn action_serializes_snake_case() {
        let json = serde_json::to_string(&RegistrationAction::GuestAssignment).unwrap();
        assert_eq!(json, "\"guest_assignment\"");
        assert_eq!(RegistrationAction::ContactSupport.as_str(), "contact_support");
    }
}
