//! Pure heuristics for the HR registration workflow.
//!
//! Everything here is free of I/O so the branch semantics of the approval
//! state machine can be tested without a database: the corporate-domain
//! check, guest account naming, and temporary credential generation.

use rand::distr::Alphanumeric;
use rand::Rng;

/// Name of the reserved fallback tenant for HR signups whose company has no
/// existing organization record. Created lazily, singleton per deployment.
pub const GUEST_ORG_NAME: &str = "Guest Organization";
pub const GUEST_ORG_SLUG: &str = "guest-organization";
pub const GUEST_ORG_PLAN: &str = "guest";

/// Fixed identity of the guest organization's administrator account.
pub const GUEST_ADMIN_USERNAME: &str = "guest_admin";
pub const GUEST_ADMIN_EMAIL: &str = "guest.admin@ez2hire.com";

/// Length of generated temporary passwords for guest HR accounts.
pub const TEMP_PASSWORD_LEN: usize = 12;

/// Public email providers that never pass the corporate-domain check.
const PUBLIC_EMAIL_PROVIDERS: &[&str] = &[
    "gmail.com",
    "yahoo.com",
    "outlook.com",
    "hotmail.com",
];

/// Extract the lowercased domain part of an email address.
pub fn email_domain(email: &str) -> Option<String> {
    let (_, domain) = email.split_once('@')?;
    if domain.is_empty() {
        return None;
    }
    Some(domain.to_ascii_lowercase())
}

/// Heuristic corporate-domain check: does `email_domain` plausibly belong to
/// the organization named `org_name`?
///
/// Public providers are rejected outright. Otherwise the organization name's
/// normalized tokens must appear within the normalized domain, either as the
/// whole squashed name or as any individual token longer than three
/// characters. This is a substring heuristic, not authoritative verification.
pub fn domain_matches_organization(email_domain: &str, org_name: &str) -> bool {
    let domain = email_domain.to_ascii_lowercase();
    if PUBLIC_EMAIL_PROVIDERS.contains(&domain.as_str()) {
        return false;
    }

    let squashed_org: String = org_name
        .to_ascii_lowercase()
        .chars()
        .filter(|c| *c != ' ' && *c != '-')
        .collect();
    let squashed_domain: String = domain
        .chars()
        .filter(|c| *c != '.' && *c != '-')
        .collect();

    if !squashed_org.is_empty() && squashed_domain.contains(&squashed_org) {
        return true;
    }

    org_name
        .to_ascii_lowercase()
        .split_whitespace()
        .filter(|part| part.len() > 3)
        .any(|part| squashed_domain.contains(part))
}

/// Derive the username for a guest HR account from the applicant's email:
/// the local part suffixed with `_guest_hr`.
pub fn derive_guest_username(email: &str) -> String {
    let local = email.split('@').next().unwrap_or(email);
    format!("{local}_guest_hr")
}

/// Generate a random alphanumeric temporary password.
pub fn generate_temp_password(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Concatenate the original-organization context of a guest signup into the
/// biography field of the provisioned account. This is the system's only
/// persistence of that context.
pub fn guest_bio(
    original_org_name: &str,
    job_title: &str,
    linkedin_url: Option<&str>,
    original_org_email: &str,
    company_website: Option<&str>,
    message: Option<&str>,
) -> String {
    format!(
        "Guest HR from {original_org_name}. Job Title: {job_title}. \
         LinkedIn: {}. Original Organization Email: {original_org_email}. \
         Website: {}. Message: {}",
        linkedin_url.unwrap_or("Not provided"),
        company_website.unwrap_or("Not provided"),
        message.unwrap_or("Not provided"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_providers_rejected() {
        assert!(!domain_matches_organization("gmail.com", "Gmail"));
        assert!(!domain_matches_organization("yahoo.com", "Yahoo Corp"));
        assert!(!domain_matches_organization("HOTMAIL.COM", "Hotmail"));
    }

    #[test]
    fn squashed_name_match() {
        assert!(domain_matches_organization("acme-corp.com", "Acme Corp"));
        assert!(domain_matches_organization("acmecorp.io", "Acme Corp"));
    }

    #[test]
    fn long_token_match() {
        // "technologies" (> 3 chars) appears in the squashed domain.
        assert!(domain_matches_organization(
            "mail.initech-technologies.com",
            "Initech Technologies"
        ));
    }

    #[test]
    fn short_tokens_do_not_match() {
        // Every token is <= 3 chars and the squashed name is absent.
        assert!(!domain_matches_organization("example.com", "A B C"));
    }

    #[test]
    fn unrelated_domain_rejected() {
        assert!(!domain_matches_organization("contractor-mail.net", "Acme Corp"));
    }

    #[test]
    fn email_domain_extraction() {
        assert_eq!(email_domain("jane@Acme.COM"), Some("acme.com".to_string()));
        assert_eq!(email_domain("not-an-email"), None);
        assert_eq!(email_domain("trailing@"), None);
    }

    #[test]
    fn guest_username_derivation() {
        assert_eq!(derive_guest_username("jane.doe@acme.com"), "jane.doe_guest_hr");
        assert_eq!(derive_guest_username("bob@x.io"), "bob_guest_hr");
    }

    #[test]
    fn temp_password_shape() {
        let pw = generate_temp_password(TEMP_PASSWORD_LEN);
        assert_eq!(pw.len(), TEMP_PASSWORD_LEN);
        assert!(pw.chars().all(|c| c.is_ascii_alphanumeric()));
        // Vanishingly unlikely to collide.
        assert_ne!(pw, generate_temp_password(TEMP_PASSWORD_LEN));
    }

    #[test]
    fn guest_bio_includes_all_context() {
        let bio = guest_bio(
            "Acme Corp",
            "HR Manager",
            Some("https://linkedin.com/in/jane"),
            "hr@acme.com",
            None,
            Some("Please review quickly"),
        );
        assert!(bio.contains("Guest HR from Acme Corp"));
        assert!(bio.contains("Job Title: HR Manager"));
        assert!(bio.contains("https://linkedin.com/in/jane"));
        assert!(bio.contains("hr@acme.com"));
        assert!(bio.contains("Website: Not provided"));
        assert!(bio.contains("Please review quickly"));
    }
}
