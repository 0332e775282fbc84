//! The preference-gated, delivery-logged email send path.
//!
//! Every outbound email on the platform flows through [`EmailGateway`]:
//! templated sends, the pre-rendered path used by the decision workflow,
//! and bulk sends. Exactly one delivery-log row is appended per attempt --
//! sent, failed, or preference-skipped -- and a failure to write the log
//! never fails the caller's send.

use std::collections::BTreeMap;

use chrono::{Datelike, Utc};
use ez2hire_core::types::DbId;
use ez2hire_db::models::notification::{self, DeliveryStats, NewEmailNotification};
use ez2hire_db::models::organization::Organization;
use ez2hire_db::models::user::User;
use ez2hire_db::repositories::{EmailNotificationRepo, NotificationPreferenceRepo};
use ez2hire_db::DbPool;

use crate::mailer::Mailer;
use crate::template::{render, TemplateStore};

/// Common context values injected into every rendered template.
pub const PLATFORM_NAME: &str = "Ez2Hire";
pub const PLATFORM_URL: &str = "https://ez2hire.com";
pub const SUPPORT_EMAIL: &str = "support@ez2hire.com";

// ---------------------------------------------------------------------------
// Outcome types
// ---------------------------------------------------------------------------

/// Result of one send attempt.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SendOutcome {
    pub success: bool,
    pub skipped: bool,
    pub error: Option<String>,
}

impl SendOutcome {
    pub fn sent() -> Self {
        Self {
            success: true,
            skipped: false,
            error: None,
        }
    }

    pub fn skipped() -> Self {
        Self {
            success: false,
            skipped: true,
            error: Some("User has disabled this notification type".to_string()),
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            skipped: false,
            error: Some(error.into()),
        }
    }
}

/// One bulk-send recipient: address plus per-recipient context overlay.
#[derive(Debug, Clone)]
pub struct BulkRecipient {
    pub email: String,
    pub user_id: Option<DbId>,
    /// Overlaid on the base context; recipient keys win.
    pub context: BTreeMap<String, String>,
    /// Overrides the batch subject for this recipient.
    pub subject: Option<String>,
}

/// Tally of a bulk send. `details` holds one entry per recipient in input
/// order.
#[derive(Debug, Default, serde::Serialize)]
pub struct BulkSendReport {
    pub sent: usize,
    pub failed: usize,
    pub skipped: usize,
    pub details: Vec<(String, SendOutcome)>,
}

impl BulkSendReport {
    fn record(&mut self, email: String, outcome: SendOutcome) {
        if outcome.success {
            self.sent += 1;
        } else if outcome.skipped {
            self.skipped += 1;
        } else {
            self.failed += 1;
        }
        self.details.push((email, outcome));
    }
}

/// Whether a preference row permits sending. Absence of a row means
/// enabled: the store only holds explicit opt-outs/overrides.
pub fn preference_allows(row: Option<&notification::NotificationPreference>) -> bool {
    row.map(|pref| pref.enabled).unwrap_or(true)
}

/// Inject the platform-wide defaults into a caller-supplied context.
/// Enrichment values are defaults only -- caller keys always win.
pub fn enrich_context(caller: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    let now = Utc::now();
    let mut context = BTreeMap::from([
        ("platform_name".to_string(), PLATFORM_NAME.to_string()),
        ("platform_url".to_string(), PLATFORM_URL.to_string()),
        ("support_email".to_string(), SUPPORT_EMAIL.to_string()),
        ("current_year".to_string(), now.year().to_string()),
        (
            "timestamp".to_string(),
            now.format("%Y-%m-%d %H:%M:%S").to_string(),
        ),
    ]);
    for (key, value) in caller {
        context.insert(key.clone(), value.clone());
    }
    context
}

// ---------------------------------------------------------------------------
// EmailGateway
// ---------------------------------------------------------------------------

/// The platform's single outbound-email entry point.
pub struct EmailGateway {
    pool: DbPool,
    mailer: Mailer,
    templates: TemplateStore,
}

impl EmailGateway {
    pub fn new(pool: DbPool, mailer: Mailer, templates: TemplateStore) -> Self {
        Self {
            pool,
            mailer,
            templates,
        }
    }

    /// Send a templated email.
    ///
    /// Order of operations: preference gate, template resolution (with
    /// default fallback), context enrichment, one delivery attempt, one log
    /// row. Transport failures are caught and reported in the outcome,
    /// never propagated.
    pub async fn send(
        &self,
        to_email: &str,
        subject: &str,
        template_name: &str,
        context: &BTreeMap<String, String>,
        user_id: Option<DbId>,
    ) -> SendOutcome {
        if let Some(outcome) = self
            .gate(to_email, subject, template_name, user_id)
            .await
        {
            return outcome;
        }

        let template = self.templates.get(template_name);
        let enriched = enrich_context(context);
        let html = render(&template.html, &enriched);
        let text = render(&template.text, &enriched);

        self.dispatch(to_email, subject, template_name, &html, &text, user_id)
            .await
    }

    /// Send a fully pre-rendered email through the same transport, gate,
    /// and log path, bypassing template resolution. `label` is recorded as
    /// the template name in the delivery log.
    pub async fn send_prerendered(
        &self,
        to_email: &str,
        subject: &str,
        html_body: &str,
        text_body: &str,
        label: &str,
        user_id: Option<DbId>,
    ) -> SendOutcome {
        if let Some(outcome) = self.gate(to_email, subject, label, user_id).await {
            return outcome;
        }
        self.dispatch(to_email, subject, label, html_body, text_body, user_id)
            .await
    }

    /// Send one templated email per recipient. Each recipient is processed
    /// independently: one failure never aborts the batch.
    pub async fn send_bulk(
        &self,
        recipients: &[BulkRecipient],
        template_name: &str,
        base_context: &BTreeMap<String, String>,
    ) -> BulkSendReport {
        let default_subject = base_context
            .get("subject")
            .cloned()
            .unwrap_or_else(|| format!("{PLATFORM_NAME} Notification"));

        let mut report = BulkSendReport::default();
        for recipient in recipients {
            let mut context = base_context.clone();
            for (key, value) in &recipient.context {
                context.insert(key.clone(), value.clone());
            }
            let subject = recipient.subject.as_deref().unwrap_or(&default_subject);

            let outcome = self
                .send(
                    &recipient.email,
                    subject,
                    template_name,
                    &context,
                    recipient.user_id,
                )
                .await;
            report.record(recipient.email.clone(), outcome);
        }
        report
    }

    /// Delivery counts for the current day plus transport configuration
    /// summary fields live on the admin surface; this returns the log side.
    pub async fn delivery_stats(&self) -> Result<DeliveryStats, sqlx::Error> {
        EmailNotificationRepo::today_stats(&self.pool).await
    }

    // -- internals ----------------------------------------------------------

    /// Apply the preference gate. Returns `Some(outcome)` when the send
    /// must not proceed. Lookup errors default to allow so a preference
    /// store hiccup cannot silence the platform.
    async fn gate(
        &self,
        to_email: &str,
        subject: &str,
        template_name: &str,
        user_id: Option<DbId>,
    ) -> Option<SendOutcome> {
        let user_id = user_id?;
        let row = match NotificationPreferenceRepo::find(&self.pool, user_id, template_name).await
        {
            Ok(row) => row,
            Err(err) => {
                tracing::error!(user_id, error = %err, "Preference lookup failed, defaulting to allow");
                None
            }
        };

        if preference_allows(row.as_ref()) {
            return None;
        }

        tracing::info!(to = to_email, template_name, "Email skipped by user preference");
        self.log(
            Some(user_id),
            to_email,
            subject,
            template_name,
            notification::STATUS_SKIPPED,
            None,
        )
        .await;
        Some(SendOutcome::skipped())
    }

    /// One delivery attempt plus its log row.
    async fn dispatch(
        &self,
        to_email: &str,
        subject: &str,
        template_name: &str,
        html_body: &str,
        text_body: &str,
        user_id: Option<DbId>,
    ) -> SendOutcome {
        match self
            .mailer
            .deliver(to_email, subject, html_body, text_body)
            .await
        {
            Ok(()) => {
                self.log(
                    user_id,
                    to_email,
                    subject,
                    template_name,
                    notification::STATUS_SENT,
                    None,
                )
                .await;
                SendOutcome::sent()
            }
            Err(err) => {
                tracing::error!(to = to_email, error = %err, "Email delivery failed");
                let message = err.to_string();
                self.log(
                    user_id,
                    to_email,
                    subject,
                    template_name,
                    notification::STATUS_FAILED,
                    Some(message.clone()),
                )
                .await;
                SendOutcome::failed(message)
            }
        }
    }

    /// Append one delivery-log row; log-write failures are swallowed so
    /// they cannot fail the caller's send.
    async fn log(
        &self,
        user_id: Option<DbId>,
        to_email: &str,
        subject: &str,
        template_name: &str,
        status: &str,
        error_message: Option<String>,
    ) {
        let row = NewEmailNotification {
            user_id,
            to_email: to_email.to_string(),
            subject: subject.to_string(),
            template_name: template_name.to_string(),
            status: status.to_string(),
            error_message,
        };
        if let Err(err) = EmailNotificationRepo::insert(&self.pool, &row).await {
            tracing::error!(to = to_email, error = %err, "Failed to write email delivery log");
        }
    }
}

// ---------------------------------------------------------------------------
// Convenience sends
// ---------------------------------------------------------------------------

impl EmailGateway {
    /// Welcome a newly invited user with their temporary credentials.
    pub async fn send_user_invitation(
        &self,
        user: &User,
        organization: &Organization,
        temporary_password: &str,
    ) -> SendOutcome {
        let context = BTreeMap::from([
            ("user_name".to_string(), user.display_name()),
            ("username".to_string(), user.username.clone()),
            (
                "temporary_password".to_string(),
                temporary_password.to_string(),
            ),
            ("organization_name".to_string(), organization.name.clone()),
            ("login_url".to_string(), format!("{PLATFORM_URL}/login")),
            (
                "message".to_string(),
                format!(
                    "Welcome to {PLATFORM_NAME}! Your account has been created for {}.",
                    organization.name
                ),
            ),
        ]);
        self.send(
            &user.email,
            &format!("Welcome to {PLATFORM_NAME} - {}", organization.name),
            "user_invitation",
            &context,
            Some(user.id),
        )
        .await
    }

    /// Remind a participant about an upcoming interview.
    pub async fn send_interview_reminder(
        &self,
        user: &User,
        interview_title: &str,
        interview_date: &str,
        interview_url: &str,
    ) -> SendOutcome {
        let context = BTreeMap::from([
            ("user_name".to_string(), user.display_name()),
            ("interview_title".to_string(), interview_title.to_string()),
            ("interview_date".to_string(), interview_date.to_string()),
            ("interview_url".to_string(), interview_url.to_string()),
            (
                "message".to_string(),
                format!("Reminder: You have an upcoming interview scheduled for {interview_date}."),
            ),
        ]);
        self.send(
            &user.email,
            &format!("Interview Reminder - {interview_title}"),
            "interview_reminder",
            &context,
            Some(user.id),
        )
        .await
    }

    /// Tell a recruiter about a new job application.
    pub async fn send_application_notification(
        &self,
        recruiter: &User,
        candidate: &User,
        job_title: &str,
        application_url: &str,
    ) -> SendOutcome {
        let context = BTreeMap::from([
            ("recruiter_name".to_string(), recruiter.display_name()),
            ("candidate_name".to_string(), candidate.display_name()),
            ("job_title".to_string(), job_title.to_string()),
            ("application_url".to_string(), application_url.to_string()),
            (
                "message".to_string(),
                format!("A new application has been received for {job_title}."),
            ),
        ]);
        self.send(
            &recruiter.email,
            &format!("New Application - {job_title}"),
            "job_application_notification",
            &context,
            Some(recruiter.id),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use ez2hire_db::models::notification::NotificationPreference;

    fn pref(enabled: bool) -> NotificationPreference {
        NotificationPreference {
            id: 1,
            user_id: 1,
            notification_type: "user_invitation".to_string(),
            enabled,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn missing_preference_row_defaults_to_allow() {
        assert!(preference_allows(None));
    }

    #[test]
    fn enabled_row_allows_and_disabled_row_blocks() {
        assert!(preference_allows(Some(&pref(true))));
        assert!(!preference_allows(Some(&pref(false))));
    }

    #[test]
    fn enrichment_injects_platform_defaults() {
        let enriched = enrich_context(&BTreeMap::new());
        assert_eq!(enriched["platform_name"], PLATFORM_NAME);
        assert_eq!(enriched["platform_url"], PLATFORM_URL);
        assert_eq!(enriched["support_email"], SUPPORT_EMAIL);
        assert!(enriched.contains_key("current_year"));
        assert!(enriched.contains_key("timestamp"));
    }

    #[test]
    fn enrichment_never_overrides_caller_keys() {
        let caller = BTreeMap::from([
            ("platform_name".to_string(), "Custom Brand".to_string()),
            ("message".to_string(), "hello".to_string()),
        ]);
        let enriched = enrich_context(&caller);
        assert_eq!(enriched["platform_name"], "Custom Brand");
        assert_eq!(enriched["message"], "hello");
    }

    #[test]
    fn bulk_report_tallies_by_outcome() {
        let mut report = BulkSendReport::default();
        report.record("a@x.com".to_string(), SendOutcome::sent());
        report.record("b@x.com".to_string(), SendOutcome::skipped());
        report.record("c@x.com".to_string(), SendOutcome::failed("boom"));
        assert_eq!((report.sent, report.skipped, report.failed), (1, 1, 1));
        assert_eq!(report.details.len(), 3);
    }

    #[test]
    fn outcome_constructors() {
        assert!(SendOutcome::sent().success);
        let skipped = SendOutcome::skipped();
        assert!(!skipped.success);
        assert!(skipped.skipped);
        let failed = SendOutcome::failed("connection refused");
        assert!(!failed.success);
        assert!(!failed.skipped);
        assert_eq!(failed.error.as_deref(), Some("connection refused"));
    }
}
