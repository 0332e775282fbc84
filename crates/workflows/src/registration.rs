//! HR registration and approval workflow.
//!
//! A single submitted [`RegistrationRequest`] resolves to one of three
//! terminal outcomes:
//!
//! - the target organization exists and the request is rejected (duplicate
//!   account or non-corporate email domain),
//! - the target organization exists and the request is parked pending
//!   approval by its admins (or the platform super-admin when it has none),
//! - the target organization is unknown and the applicant is
//!   auto-provisioned into the Guest Organization with immediate limited
//!   access.
//!
//! The approve/reject action that would later create an account for a
//! parked request lives outside this module.

use std::sync::Arc;

use ez2hire_core::decision::RegistrationAction;
use ez2hire_core::registration::{
    derive_guest_username, domain_matches_organization, email_domain, generate_temp_password,
    guest_bio, GUEST_ADMIN_EMAIL, GUEST_ADMIN_USERNAME, GUEST_ORG_NAME, GUEST_ORG_PLAN,
    GUEST_ORG_SLUG, TEMP_PASSWORD_LEN,
};
use ez2hire_core::roles::{ROLE_ADMIN, ROLE_RECRUITER, ROLE_SUPER_ADMIN};
use ez2hire_db::models::organization::{CreateOrganization, Organization};
use ez2hire_db::models::user::{CreateUser, User};
use ez2hire_db::repositories::{OrganizationRepo, UserRepo};
use ez2hire_db::{is_unique_violation, DbPool};
use ez2hire_notify::gateway::PLATFORM_URL;
use ez2hire_notify::EmailGateway;
use serde::{Deserialize, Serialize};

use crate::password::hash_password;
use crate::WorkflowError;

/// Default password for the lazily created guest admin account, overridable
/// via `GUEST_ADMIN_PASSWORD`.
const DEFAULT_GUEST_ADMIN_PASSWORD: &str = "GuestAdmin2025!";

// ---------------------------------------------------------------------------
// Request / outcome types
// ---------------------------------------------------------------------------

/// A submitted HR signup. Immutable once constructed; consumed within one
/// workflow invocation and never persisted as its own row.
#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub organization_name: String,
    pub organization_email: String,
    pub job_title: String,
    pub linkedin_url: Option<String>,
    pub company_website: Option<String>,
    pub message: Option<String>,
}

/// Structured result returned for every branch of the workflow.
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationOutcome {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<RegistrationAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub next_steps: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RegistrationOutcome {
    fn failure(message: &str, action: RegistrationAction, details: Option<&str>) -> Self {
        Self {
            success: false,
            message: message.to_string(),
            action: Some(action),
            details: details.map(str::to_string),
            next_steps: Vec::new(),
            error: None,
        }
    }

    fn system_error(error: String) -> Self {
        Self {
            success: false,
            message: "Registration request failed due to system error".to_string(),
            action: None,
            details: None,
            next_steps: Vec::new(),
            error: Some(error),
        }
    }
}

/// Which branch applies when the target organization already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExistingOrgOutcome {
    /// An account with this (email, organization) pair already exists.
    Duplicate,
    /// The applicant's email domain failed the corporate-domain check.
    DomainMismatch,
    /// The organization has admins who can approve the request.
    OrgAdminApproval,
    /// No org admins exist; escalate to the platform super-admin.
    SuperAdminApproval,
}

/// The pure decision table for the existing-organization path, in check
/// order: duplicates reject before the domain check, which rejects before
/// any approval routing.
pub fn resolve_existing_org_outcome(
    duplicate_exists: bool,
    domain_ok: bool,
    admin_count: usize,
) -> ExistingOrgOutcome {
    if duplicate_exists {
        ExistingOrgOutcome::Duplicate
    } else if !domain_ok {
        ExistingOrgOutcome::DomainMismatch
    } else if admin_count > 0 {
        ExistingOrgOutcome::OrgAdminApproval
    } else {
        ExistingOrgOutcome::SuperAdminApproval
    }
}

/// Body of the approval-request email sent to reviewing admins.
fn approval_request_body(request: &RegistrationRequest, organization_name: &str) -> String {
    format!(
        "New HR registration request requires your approval:\n\n\
         Organization: {organization_name}\n\
         Applicant: {} {}\n\
         Email: {}\n\
         Phone: {}\n\
         Job Title: {}\n\
         LinkedIn: {}\n\
         Message: {}\n\n\
         Please review and approve or reject this request in the admin panel.",
        request.first_name,
        request.last_name,
        request.email,
        request.phone,
        request.job_title,
        request.linkedin_url.as_deref().unwrap_or("Not provided"),
        request.message.as_deref().unwrap_or("Not provided"),
    )
}

// ---------------------------------------------------------------------------
// RegistrationService
// ---------------------------------------------------------------------------

/// Runs the registration/approval workflow.
pub struct RegistrationService {
    pool: DbPool,
    gateway: Arc<EmailGateway>,
}

impl RegistrationService {
    pub fn new(pool: DbPool, gateway: Arc<EmailGateway>) -> Self {
        Self { pool, gateway }
    }

    /// Process a registration request. Never fails the caller: any
    /// unexpected fault is converted into a system-error outcome here.
    pub async fn register(&self, request: &RegistrationRequest) -> RegistrationOutcome {
        match self.run(request).await {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::error!(
                    email = %request.email,
                    organization = %request.organization_name,
                    error = %err,
                    "HR registration request failed"
                );
                RegistrationOutcome::system_error(err.to_string())
            }
        }
    }

    async fn run(&self, request: &RegistrationRequest) -> Result<RegistrationOutcome, WorkflowError> {
        match OrganizationRepo::find_by_name(&self.pool, &request.organization_name).await? {
            Some(organization) => self.handle_existing_organization(&organization, request).await,
            None => self.handle_new_organization(request).await,
        }
    }

    // -- existing organization ----------------------------------------------

    async fn handle_existing_organization(
        &self,
        organization: &Organization,
        request: &RegistrationRequest,
    ) -> Result<RegistrationOutcome, WorkflowError> {
        let duplicate_exists =
            UserRepo::find_by_email_in_org(&self.pool, &request.email, organization.id)
                .await?
                .is_some();
        let domain_ok = email_domain(&request.email)
            .map(|domain| domain_matches_organization(&domain, &organization.name))
            .unwrap_or(false);
        let admins = UserRepo::find_admins(&self.pool, organization.id).await?;

        match resolve_existing_org_outcome(duplicate_exists, domain_ok, admins.len()) {
            ExistingOrgOutcome::Duplicate => Ok(RegistrationOutcome::failure(
                "An account with this email already exists for this organization",
                RegistrationAction::ContactSupport,
                None,
            )),
            ExistingOrgOutcome::DomainMismatch => Ok(RegistrationOutcome::failure(
                "Email domain does not match organization domain",
                RegistrationAction::VerifyEmail,
                Some("Please use your official company email address"),
            )),
            ExistingOrgOutcome::OrgAdminApproval => {
                self.notify_approvers(&admins, organization, request).await;
                Ok(RegistrationOutcome {
                    success: true,
                    message: "Registration request submitted for organization admin approval"
                        .to_string(),
                    action: Some(RegistrationAction::WaitApproval),
                    details: Some(format!(
                        "Your request has been sent to {} administrators for review.",
                        organization.name
                    )),
                    next_steps: vec![
                        "Wait for organization admin review".to_string(),
                        "Receive approval/rejection notification".to_string(),
                        "If approved, receive login credentials".to_string(),
                    ],
                    error: None,
                })
            }
            ExistingOrgOutcome::SuperAdminApproval => {
                let super_admin =
                    UserRepo::find_first_by_role(&self.pool, ROLE_SUPER_ADMIN).await?;
                if let Some(super_admin) = super_admin {
                    self.notify_approvers(std::slice::from_ref(&super_admin), organization, request)
                        .await;
                } else {
                    tracing::warn!(
                        organization = %organization.name,
                        "No super admin account exists to review registration request"
                    );
                }
                Ok(RegistrationOutcome {
                    success: true,
                    message: "Registration request submitted for super admin approval".to_string(),
                    action: Some(RegistrationAction::WaitApproval),
                    details: Some(
                        "Your request has been sent to the platform administrators for review."
                            .to_string(),
                    ),
                    next_steps: vec![
                        "Wait for super admin review".to_string(),
                        "Receive approval/rejection notification".to_string(),
                        "If approved, receive login credentials".to_string(),
                    ],
                    error: None,
                })
            }
        }
    }

    /// Send the approval-request email to each reviewer. Notification
    /// failures degrade to a log line; they never fail the workflow.
    async fn notify_approvers(
        &self,
        approvers: &[User],
        organization: &Organization,
        request: &RegistrationRequest,
    ) {
        let body = approval_request_body(request, &organization.name);
        for approver in approvers {
            let context = std::collections::BTreeMap::from([
                ("message".to_string(), body.clone()),
                ("user_name".to_string(), approver.display_name()),
                ("title".to_string(), "HR Registration Request".to_string()),
                ("action_url".to_string(), format!("{PLATFORM_URL}/admin")),
            ]);
            let outcome = self
                .gateway
                .send(
                    &approver.email,
                    &format!("HR Registration Request - {}", organization.name),
                    "notification",
                    &context,
                    Some(approver.id),
                )
                .await;
            if !outcome.success && !outcome.skipped {
                tracing::warn!(
                    to = %approver.email,
                    error = ?outcome.error,
                    "Failed to notify approver of registration request"
                );
            }
        }
    }

    // -- new organization (guest path) --------------------------------------

    async fn handle_new_organization(
        &self,
        request: &RegistrationRequest,
    ) -> Result<RegistrationOutcome, WorkflowError> {
        let guest_org = OrganizationRepo::get_or_create(
            &self.pool,
            &CreateOrganization {
                name: GUEST_ORG_NAME.to_string(),
                slug: GUEST_ORG_SLUG.to_string(),
                subscription_plan: GUEST_ORG_PLAN.to_string(),
            },
        )
        .await?;
        let guest_admin = self.get_or_create_guest_admin(&guest_org).await?;

        // A request never creates a second account for the same
        // (email, organization) pair.
        if UserRepo::find_by_email_in_org(&self.pool, &request.email, guest_org.id)
            .await?
            .is_some()
        {
            return Ok(RegistrationOutcome::failure(
                "An account with this email already exists for this organization",
                RegistrationAction::ContactSupport,
                None,
            ));
        }

        let temp_password = generate_temp_password(TEMP_PASSWORD_LEN);
        let password_hash =
            hash_password(&temp_password).map_err(|e| WorkflowError::Hash(e.to_string()))?;

        let hr_user = UserRepo::create(
            &self.pool,
            &CreateUser {
                username: derive_guest_username(&request.email),
                email: request.email.clone(),
                password_hash,
                role: ROLE_RECRUITER.to_string(),
                organization_id: guest_org.id,
                first_name: Some(request.first_name.clone()),
                last_name: Some(request.last_name.clone()),
                phone: Some(request.phone.clone()),
                job_title: Some(request.job_title.clone()),
                bio: Some(guest_bio(
                    &request.organization_name,
                    &request.job_title,
                    request.linkedin_url.as_deref(),
                    &request.organization_email,
                    request.company_website.as_deref(),
                    request.message.as_deref(),
                )),
                linkedin_url: request.linkedin_url.clone(),
                profile_completed: true,
                is_organization_employee: true,
                cross_org_accessible: false,
            },
        )
        .await?;

        tracing::info!(
            user_id = hr_user.id,
            email = %hr_user.email,
            original_organization = %request.organization_name,
            "Provisioned guest HR account"
        );

        self.send_guest_credentials(&hr_user, &temp_password, &request.organization_name)
            .await;
        self.notify_guest_admin(&guest_admin, &hr_user, request).await;

        Ok(RegistrationOutcome {
            success: true,
            message: "Registration completed successfully".to_string(),
            action: Some(RegistrationAction::GuestAssignment),
            details: Some(
                "You have been assigned to Guest Organization for review. A Guest Admin will \
                 evaluate your profile and may approve limited access."
                    .to_string(),
            ),
            next_steps: vec![
                "You can now login with your credentials".to_string(),
                "Guest Admin will review your profile".to_string(),
                "Limited access granted initially".to_string(),
                "Full access after organization verification".to_string(),
            ],
            error: None,
        })
    }

    /// Idempotent lookup-or-create of the guest organization's admin
    /// account. A concurrent first-time race loses on the (username,
    /// organization) unique constraint and recovers by re-reading.
    async fn get_or_create_guest_admin(
        &self,
        guest_org: &Organization,
    ) -> Result<User, WorkflowError> {
        let admins = UserRepo::find_admins(&self.pool, guest_org.id).await?;
        if let Some(admin) = admins.into_iter().next() {
            return Ok(admin);
        }

        let password = std::env::var("GUEST_ADMIN_PASSWORD")
            .unwrap_or_else(|_| DEFAULT_GUEST_ADMIN_PASSWORD.to_string());
        let password_hash =
            hash_password(&password).map_err(|e| WorkflowError::Hash(e.to_string()))?;

        let input = CreateUser {
            username: GUEST_ADMIN_USERNAME.to_string(),
            email: GUEST_ADMIN_EMAIL.to_string(),
            password_hash,
            role: ROLE_ADMIN.to_string(),
            organization_id: guest_org.id,
            first_name: Some("Guest".to_string()),
            last_name: Some("Administrator".to_string()),
            phone: None,
            job_title: None,
            bio: None,
            linkedin_url: None,
            profile_completed: true,
            is_organization_employee: true,
            cross_org_accessible: false,
        };

        match UserRepo::create(&self.pool, &input).await {
            Ok(admin) => {
                tracing::info!(user_id = admin.id, "Created Guest Organization admin");
                Ok(admin)
            }
            Err(err) if is_unique_violation(&err) => {
                tracing::debug!("Lost guest admin create race, re-reading");
                UserRepo::find_admins(&self.pool, guest_org.id)
                    .await?
                    .into_iter()
                    .next()
                    .ok_or(WorkflowError::NotFound {
                        entity: "User",
                        id: guest_org.id,
                    })
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn send_guest_credentials(
        &self,
        hr_user: &User,
        temp_password: &str,
        original_org_name: &str,
    ) {
        let body = format!(
            "Welcome to Ez2Hire, {}!\n\n\
             Your HR registration for {original_org_name} has been processed and you have been \
             assigned to our Guest Organization system for review.\n\n\
             Login Credentials:\n\
             Username: {}\n\
             Password: {temp_password}\n\n\
             Next Steps:\n\
             1. Log in to your account\n\
             2. Complete your profile if needed\n\
             3. Guest Admin will review your profile\n\
             4. Limited access is available immediately\n\
             5. Full access will be granted after verification\n\n\
             Please change your password after first login.",
            hr_user.first_name.as_deref().unwrap_or("HR Professional"),
            hr_user.username,
        );
        let context = std::collections::BTreeMap::from([
            ("message".to_string(), body),
            ("user_name".to_string(), hr_user.display_name()),
            (
                "title".to_string(),
                "HR Registration Confirmation".to_string(),
            ),
            ("action_url".to_string(), format!("{PLATFORM_URL}/login")),
        ]);
        let outcome = self
            .gateway
            .send(
                &hr_user.email,
                "Welcome to Ez2Hire - Guest HR Access",
                "notification",
                &context,
                Some(hr_user.id),
            )
            .await;
        if !outcome.success && !outcome.skipped {
            tracing::warn!(
                to = %hr_user.email,
                error = ?outcome.error,
                "Failed to send guest HR credentials"
            );
        }
    }

    async fn notify_guest_admin(
        &self,
        guest_admin: &User,
        hr_user: &User,
        request: &RegistrationRequest,
    ) {
        let body = format!(
            "New HR professional has been assigned to Guest Organization:\n\n\
             HR Details:\n\
             Name: {}\n\
             Email: {}\n\
             Phone: {}\n\
             Username: {}\n\n\
             Original Organization Information:\n\
             Organization: {}\n\
             Organization Email: {}\n\
             Website: {}\n\
             Message: {}\n\n\
             Please log in to review and manage this Guest HR profile.",
            hr_user.display_name(),
            hr_user.email,
            hr_user.phone.as_deref().unwrap_or("Not provided"),
            hr_user.username,
            request.organization_name,
            request.organization_email,
            request.company_website.as_deref().unwrap_or("Not provided"),
            request.message.as_deref().unwrap_or("Not provided"),
        );
        let context = std::collections::BTreeMap::from([
            ("message".to_string(), body),
            ("user_name".to_string(), guest_admin.display_name()),
            (
                "title".to_string(),
                "New HR Registration in Guest Organization".to_string(),
            ),
            ("action_url".to_string(), format!("{PLATFORM_URL}/admin")),
        ]);
        let outcome = self
            .gateway
            .send(
                &guest_admin.email,
                &format!("New Guest HR Profile - {}", hr_user.display_name()),
                "notification",
                &context,
                Some(guest_admin.id),
            )
            .await;
        if !outcome.success && !outcome.skipped {
            tracing::warn!(
                to = %guest_admin.email,
                error = ?outcome.error,
                "Failed to notify guest admin of new HR profile"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_rejects_before_everything_else() {
        assert_eq!(
            resolve_existing_org_outcome(true, true, 3),
            ExistingOrgOutcome::Duplicate
        );
        assert_eq!(
            resolve_existing_org_outcome(true, false, 0),
            ExistingOrgOutcome::Duplicate
        );
    }

    #[test]
    fn domain_mismatch_rejects_before_approval_routing() {
        assert_eq!(
            resolve_existing_org_outcome(false, false, 3),
            ExistingOrgOutcome::DomainMismatch
        );
    }

    #[test]
    fn admins_present_routes_to_org_admins() {
        assert_eq!(
            resolve_existing_org_outcome(false, true, 1),
            ExistingOrgOutcome::OrgAdminApproval
        );
    }

    #[test]
    fn no_admins_escalates_to_super_admin() {
        assert_eq!(
            resolve_existing_org_outcome(false, true, 0),
            ExistingOrgOutcome::SuperAdminApproval
        );
    }

    #[test]
    fn approval_body_carries_applicant_details() {
        let request = RegistrationRequest {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "jane@acme.com".to_string(),
            phone: "+15551234567".to_string(),
            organization_name: "Acme Corp".to_string(),
            organization_email: "hr@acme.com".to_string(),
            job_title: "HR Manager".to_string(),
            linkedin_url: None,
            company_website: None,
            message: Some("Looking forward".to_string()),
        };
        let body = approval_request_body(&request, "Acme Corp");
        assert!(body.contains("Organization: Acme Corp"));
        assert!(body.contains("Applicant: Jane Doe"));
        assert!(body.contains("LinkedIn: Not provided"));
        assert!(body.contains("Message: Looking forward"));
    }

    #[test]
    fn system_error_outcome_shape() {
        let outcome = RegistrationOutcome::system_error("pool exhausted".to_string());
        assert!(!outcome.success);
        assert!(outcome.action.is_none());
        assert_eq!(outcome.error.as_deref(), Some("pool exhausted"));
    }
}
