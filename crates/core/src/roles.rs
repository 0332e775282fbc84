//! Well-known role name constants.
//!
//! These must match the `users.role` column values seeded by the platform.

pub const ROLE_SUPER_ADMIN: &str = "super_admin";
pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_RECRUITER: &str = "recruiter";
pub const ROLE_CANDIDATE: &str = "candidate";
pub const ROLE_TECHNICAL: &str = "technical_person";
pub const ROLE_VIEWER: &str = "viewer";

/// All valid role values.
pub const VALID_ROLES: &[&str] = &[
    ROLE_SUPER_ADMIN,
    ROLE_ADMIN,
    ROLE_RECRUITER,
    ROLE_CANDIDATE,
    ROLE_TECHNICAL,
    ROLE_VIEWER,
];

/// Validate that a role string is one of the accepted values.
pub fn validate_role(role: &str) -> Result<(), String> {
    if VALID_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(format!(
            "Invalid role '{role}'. Must be one of: {}",
            VALID_ROLES.join(", ")
        ))
    }
}

/// Roles allowed to act on behalf of an organization (assign interviews,
/// trigger candidate notifications, invite users).
pub fn is_hiring_staff(role: &str) -> bool {
    role == ROLE_ADMIN || role == ROLE_RECRUITER || role == ROLE_SUPER_ADMIN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_roles_accepted() {
        for role in VALID_ROLES {
            assert!(validate_role(role).is_ok());
        }
    }

    #[test]
    fn unknown_role_rejected() {
        let result = validate_role("wizard");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Invalid role"));
    }

    #[test]
    fn empty_role_rejected() {
        assert!(validate_role("").is_err());
    }

    #[test]
    fn staff_roles() {
        assert!(is_hiring_staff(ROLE_ADMIN));
        assert!(is_hiring_staff(ROLE_RECRUITER));
        assert!(is_hiring_staff(ROLE_SUPER_ADMIN));
        assert!(!is_hiring_staff(ROLE_CANDIDATE));
        assert!(!is_hiring_staff(ROLE_VIEWER));
    }
}
