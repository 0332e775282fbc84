//! User entity model and DTOs.

use ez2hire_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`UserResponse`] for external-facing output.
///
/// Uniqueness is scoped per tenant: (username, organization_id) and
/// (email, organization_id). The same email may exist in two different
/// organizations as two distinct accounts.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub organization_id: DbId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub job_title: Option<String>,
    pub bio: Option<String>,
    pub linkedin_url: Option<String>,
    pub profile_completed: bool,
    pub is_organization_employee: bool,
    /// Candidates with this flag set may be messaged by recruiters from
    /// other organizations.
    pub cross_org_accessible: bool,
    pub is_active: bool,
    pub created_at: Timestamp,
}

impl User {
    /// Candidate-facing display name: "First Last" when a first name is
    /// present, otherwise the username.
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(first), None) => first.clone(),
            _ => self.username.clone(),
        }
    }
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub role: String,
    pub organization_id: DbId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
            organization_id: user.organization_id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

/// DTO for creating a new user.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub organization_id: DbId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub job_title: Option<String>,
    pub bio: Option<String>,
    pub linkedin_url: Option<String>,
    pub profile_completed: bool,
    pub is_organization_employee: bool,
    pub cross_org_accessible: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(first: Option<&str>, last: Option<&str>) -> User {
        User {
            id: 1,
            username: "jdoe".to_string(),
            email: "jdoe@acme.com".to_string(),
            password_hash: String::new(),
            role: "candidate".to_string(),
            organization_id: 1,
            first_name: first.map(str::to_string),
            last_name: last.map(str::to_string),
            phone: None,
            job_title: None,
            bio: None,
            linkedin_url: None,
            profile_completed: false,
            is_organization_employee: false,
            cross_org_accessible: true,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn display_name_prefers_full_name() {
        assert_eq!(user(Some("Jane"), Some("Doe")).display_name(), "Jane Doe");
    }

    #[test]
    fn display_name_falls_back_to_username() {
        assert_eq!(user(None, Some("Doe")).display_name(), "jdoe");
        assert_eq!(user(None, None).display_name(), "jdoe");
    }

    #[test]
    fn display_name_first_only() {
        assert_eq!(user(Some("Jane"), None).display_name(), "Jane");
    }
}
