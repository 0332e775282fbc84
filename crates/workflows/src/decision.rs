//! Candidate decision notification workflow.
//!
//! Given a completed technical-interview feedback row, sends the
//! candidate-facing acceptance or rejection email. The emails are fully
//! pre-rendered here and handed to the gateway's transport path; the named
//! template store is not involved. A feedback row is announced at most
//! once: `candidate_notified_at` is checked before sending and stamped
//! after a successful send.

use std::sync::Arc;

use ez2hire_core::decision::Decision;
use ez2hire_core::types::DbId;
use ez2hire_db::models::feedback::TechnicalInterviewFeedback;
use ez2hire_db::repositories::{
    AssignmentRepo, FeedbackRepo, InterviewRepo, OrganizationRepo, UserRepo,
};
use ez2hire_db::DbPool;
use ez2hire_notify::EmailGateway;
use serde::Serialize;

use crate::WorkflowError;

/// Position label used when the assignment's interview link is absent.
const FALLBACK_POSITION: &str = "Technical Position";

/// Template label recorded in the delivery log for decision emails.
const LOG_LABEL: &str = "interview_decision";

// ---------------------------------------------------------------------------
// Outcome types
// ---------------------------------------------------------------------------

/// What happened to one feedback row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NotifyStatus {
    /// Exactly one email was delivered and the row was stamped.
    Sent,
    /// The decision is not candidate-facing; nothing was sent.
    NoAction,
    /// The row was already announced; nothing was sent.
    AlreadyNotified,
    /// Delivery was attempted and the transport failed.
    DeliveryFailed,
}

/// Tally of a bulk run. Counts always sum to the input length.
/// Non-actionable decisions and already-notified rows are skips; failures
/// are reserved for lookups or transport going wrong.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BulkDecisionReport {
    pub successful: usize,
    pub failed: usize,
    pub skipped: usize,
}

/// A pre-rendered candidate email.
#[derive(Debug, Clone)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
    pub text: String,
}

// ---------------------------------------------------------------------------
// Email rendering (pure)
// ---------------------------------------------------------------------------

/// Render the candidate-facing email for a decision, or `None` when the
/// decision is not candidate-facing.
pub fn decision_email(
    decision: Decision,
    candidate_name: &str,
    company_name: &str,
    position_title: &str,
    hr_name: &str,
) -> Option<RenderedEmail> {
    match decision {
        Decision::Selected => Some(acceptance_email(
            candidate_name,
            company_name,
            position_title,
            hr_name,
        )),
        Decision::Rejected => Some(rejection_email(
            candidate_name,
            company_name,
            position_title,
            hr_name,
        )),
        Decision::SecondRound => None,
    }
}

fn acceptance_email(
    candidate_name: &str,
    company_name: &str,
    position_title: &str,
    hr_name: &str,
) -> RenderedEmail {
    let subject = format!("Congratulations and Welcome to {company_name}!");
    let text = format!(
        "Dear {candidate_name},\n\n\
         I'm delighted to offer you the position of {position_title} at {company_name}. We were \
         impressed by your technical expertise and believe you'll be a great fit for our team.\n\n\
         Next Steps:\n\
         - A formal offer letter will be sent to you within 24 hours\n\
         - HR will contact you to discuss start date and salary details\n\
         - Please feel free to reach out with any questions\n\n\
         Welcome aboard!\n\n\
         Best regards,\n\
         {hr_name}\n\
         {company_name} - HR Department\n"
    );
    let html = format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
  <div style="background: #2563eb; color: white; padding: 30px; border-radius: 10px 10px 0 0; text-align: center;">
    <h1 style="margin: 0;">Congratulations!</h1>
    <p style="margin: 10px 0 0 0;">Welcome to {company_name}</p>
  </div>
  <div style="background: #f8fafc; padding: 30px; border-radius: 0 0 10px 10px; border: 1px solid #e2e8f0;">
    <p>Dear {candidate_name},</p>
    <p>I'm delighted to offer you the position of <strong>{position_title}</strong> at
       <strong>{company_name}</strong>. We were impressed by your technical expertise and believe
       you'll be a great fit for our team.</p>
    <div style="background: white; padding: 20px; border-left: 4px solid #2563eb; margin: 20px 0;">
      <h3 style="color: #2563eb; margin: 0 0 15px 0;">Next Steps</h3>
      <ul style="margin: 0; padding-left: 20px;">
        <li>A formal offer letter will be sent to you within 24 hours</li>
        <li>HR will contact you to discuss start date and salary details</li>
        <li>Please feel free to reach out with any questions</li>
      </ul>
    </div>
    <p>Welcome aboard!</p>
    <p>Best regards,<br><strong>{hr_name}</strong><br>{company_name} - HR Department</p>
  </div>
</div>
"#
    );
    RenderedEmail {
        subject,
        html,
        text,
    }
}

fn rejection_email(
    candidate_name: &str,
    company_name: &str,
    position_title: &str,
    hr_name: &str,
) -> RenderedEmail {
    let subject = format!("Your Application for {position_title} at {company_name}");
    let text = format!(
        "Dear {candidate_name},\n\n\
         Thank you for taking the time to interview for the {position_title} role at \
         {company_name}. We enjoyed learning more about your background and skills.\n\n\
         After careful consideration, we have decided to move forward with another candidate \
         whose experience more closely matches our current needs. This was not an easy decision \
         and we appreciate the effort you put into the process.\n\n\
         We will keep your resume on file, and should a more fitting opportunity arise, we would \
         welcome the chance to reconnect. In the meantime, we wish you every success in your \
         career.\n\n\
         Best regards,\n\
         {hr_name}\n\
         {company_name} - HR Department\n"
    );
    let html = format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
  <div style="background: #64748b; color: white; padding: 30px; border-radius: 10px 10px 0 0; text-align: center;">
    <h1 style="margin: 0;">Thank You</h1>
    <p style="margin: 10px 0 0 0;">For Your Interest in {company_name}</p>
  </div>
  <div style="background: #f8fafc; padding: 30px; border-radius: 0 0 10px 10px; border: 1px solid #e2e8f0;">
    <p>Dear {candidate_name},</p>
    <p>Thank you for taking the time to interview for the <strong>{position_title}</strong> role
       at <strong>{company_name}</strong>. We enjoyed learning more about your background and
       skills.</p>
    <p>After careful consideration, we have decided to move forward with another candidate whose
       experience more closely matches our current needs. This was not an easy decision and we
       appreciate the effort you put into the process.</p>
    <div style="background: white; padding: 20px; border-left: 4px solid #64748b; margin: 20px 0;">
      <p style="margin: 0;">We will keep your resume on file, and should a more fitting
         opportunity arise, we would welcome the chance to reconnect.</p>
    </div>
    <p>Best regards,<br><strong>{hr_name}</strong><br>{company_name} - HR Department</p>
  </div>
</div>
"#
    );
    RenderedEmail {
        subject,
        html,
        text,
    }
}

// ---------------------------------------------------------------------------
// DecisionNotifier
// ---------------------------------------------------------------------------

/// Sends candidate decision notifications.
pub struct DecisionNotifier {
    pool: DbPool,
    gateway: Arc<EmailGateway>,
}

impl DecisionNotifier {
    pub fn new(pool: DbPool, gateway: Arc<EmailGateway>) -> Self {
        Self { pool, gateway }
    }

    /// Notify the candidate of one feedback row's decision.
    ///
    /// Returns `true` only when exactly one email was delivered. Missing
    /// links, non-actionable decisions, already-notified rows, and
    /// transport failures all log and return `false`.
    pub async fn notify_decision(&self, feedback_id: DbId, hr_user_id: DbId) -> bool {
        match self.try_notify(feedback_id, hr_user_id).await {
            Ok(status) => status == NotifyStatus::Sent,
            Err(err) => {
                tracing::error!(feedback_id, error = %err, "Decision notification failed");
                false
            }
        }
    }

    /// Process several feedback rows, isolating each item: one row's
    /// failure never aborts its siblings.
    pub async fn notify_bulk(&self, feedback_ids: &[DbId], hr_user_id: DbId) -> BulkDecisionReport {
        let mut report = BulkDecisionReport::default();
        for &feedback_id in feedback_ids {
            match self.try_notify(feedback_id, hr_user_id).await {
                Ok(NotifyStatus::Sent) => report.successful += 1,
                Ok(NotifyStatus::NoAction | NotifyStatus::AlreadyNotified) => report.skipped += 1,
                Ok(NotifyStatus::DeliveryFailed) => report.failed += 1,
                Err(err) => {
                    tracing::error!(feedback_id, error = %err, "Decision notification failed");
                    report.failed += 1;
                }
            }
        }
        report
    }

    async fn try_notify(
        &self,
        feedback_id: DbId,
        hr_user_id: DbId,
    ) -> Result<NotifyStatus, WorkflowError> {
        let feedback = FeedbackRepo::find_by_id(&self.pool, feedback_id)
            .await?
            .ok_or(WorkflowError::NotFound {
                entity: "TechnicalInterviewFeedback",
                id: feedback_id,
            })?;

        if feedback.candidate_notified_at.is_some() {
            tracing::info!(feedback_id, "Candidate already notified, skipping");
            return Ok(NotifyStatus::AlreadyNotified);
        }

        let decision = match Decision::parse(&feedback.decision) {
            Some(decision) if decision.is_candidate_facing() => decision,
            _ => {
                tracing::warn!(
                    feedback_id,
                    decision = %feedback.decision,
                    "No notification sent for non-terminal decision"
                );
                return Ok(NotifyStatus::NoAction);
            }
        };

        let (candidate_email, rendered) = match self
            .render_for(&feedback, decision, hr_user_id)
            .await?
        {
            Some(rendered) => rendered,
            None => return Ok(NotifyStatus::NoAction),
        };

        let outcome = self
            .gateway
            .send_prerendered(
                &candidate_email,
                &rendered.subject,
                &rendered.html,
                &rendered.text,
                LOG_LABEL,
                None,
            )
            .await;

        if !outcome.success {
            return Ok(NotifyStatus::DeliveryFailed);
        }

        if !FeedbackRepo::mark_candidate_notified(&self.pool, feedback_id).await? {
            // A concurrent caller stamped first; the candidate still got
            // (at least) one email, so report success.
            tracing::warn!(feedback_id, "Feedback was stamped concurrently");
        }
        tracing::info!(
            feedback_id,
            decision = decision.as_str(),
            "Candidate decision notification sent"
        );
        Ok(NotifyStatus::Sent)
    }

    /// Hydrate the entity chain and pre-render the email for it. `None`
    /// means the decision has no candidate-facing email.
    async fn render_for(
        &self,
        feedback: &TechnicalInterviewFeedback,
        decision: Decision,
        hr_user_id: DbId,
    ) -> Result<Option<(String, RenderedEmail)>, WorkflowError> {
        let assignment = AssignmentRepo::find_by_id(&self.pool, feedback.assignment_id)
            .await?
            .ok_or(WorkflowError::NotFound {
                entity: "TechnicalInterviewAssignment",
                id: feedback.assignment_id,
            })?;
        let candidate = UserRepo::find_by_id(&self.pool, assignment.candidate_id)
            .await?
            .ok_or(WorkflowError::NotFound {
                entity: "User",
                id: assignment.candidate_id,
            })?;
        let organization = OrganizationRepo::find_by_id(&self.pool, assignment.organization_id)
            .await?
            .ok_or(WorkflowError::NotFound {
                entity: "Organization",
                id: assignment.organization_id,
            })?;
        let hr_user = UserRepo::find_by_id(&self.pool, hr_user_id)
            .await?
            .ok_or(WorkflowError::NotFound {
                entity: "User",
                id: hr_user_id,
            })?;

        let position_title = InterviewRepo::find_by_id(&self.pool, assignment.interview_id)
            .await?
            .map(|interview| interview.title)
            .unwrap_or_else(|| FALLBACK_POSITION.to_string());

        Ok(decision_email(
            decision,
            &candidate.display_name(),
            &organization.name,
            &position_title,
            &hr_user.display_name(),
        )
        .map(|rendered| (candidate.email.clone(), rendered)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selected_renders_acceptance() {
        let email = decision_email(
            Decision::Selected,
            "Jane Doe",
            "Acme Corp",
            "Senior Rust Engineer",
            "Max Power",
        )
        .expect("selected must render");
        assert_eq!(email.subject, "Congratulations and Welcome to Acme Corp!");
        assert!(email.text.contains("Senior Rust Engineer"));
        assert!(email.html.contains("Jane Doe"));
        assert!(email.html.contains("Max Power"));
    }

    #[test]
    fn rejected_renders_rejection() {
        let email = decision_email(
            Decision::Rejected,
            "Jane Doe",
            "Acme Corp",
            "Senior Rust Engineer",
            "Max Power",
        )
        .expect("rejected must render");
        assert_eq!(
            email.subject,
            "Your Application for Senior Rust Engineer at Acme Corp"
        );
        assert!(email.text.contains("move forward with another candidate"));
        assert!(email.html.contains("Thank You"));
    }

    #[test]
    fn second_round_renders_nothing() {
        assert!(decision_email(
            Decision::SecondRound,
            "Jane Doe",
            "Acme Corp",
            "Senior Rust Engineer",
            "Max Power",
        )
        .is_none());
    }

    #[test]
    fn bulk_report_default_is_zeroed() {
        let report = BulkDecisionReport::default();
        assert_eq!(report.successful + report.failed + report.skipped, 0);
    }
}
