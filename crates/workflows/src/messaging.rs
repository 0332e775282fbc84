//! Peer-to-peer messaging and inbox aggregation.
//!
//! Sends are permission-gated by tenant membership and role; reading a
//! thread marks the partner's unread messages as read (the read receipt).

use std::collections::HashMap;
use std::sync::Arc;

use ez2hire_core::error::CoreError;
use ez2hire_core::roles::{ROLE_CANDIDATE, ROLE_SUPER_ADMIN};
use ez2hire_core::types::DbId;
use ez2hire_db::models::message::{
    ConversationSummary, Message, NewMessage, PRIORITY_NORMAL, TYPE_DIRECT,
};
use ez2hire_db::models::user::User;
use ez2hire_db::repositories::{MessageRepo, UserRepo};
use ez2hire_db::DbPool;
use ez2hire_notify::EmailGateway;

/// Default page size for conversations and threads.
const DEFAULT_LIMIT: i64 = 50;

/// Whether `sender` may message `recipient`.
///
/// Allowed when both belong to the same organization, when the sender is
/// the platform super-admin, or when the recipient is a candidate who has
/// opted into cross-organization visibility.
pub fn can_message(sender: &User, recipient: &User) -> bool {
    if sender.organization_id == recipient.organization_id {
        return true;
    }
    if sender.role == ROLE_SUPER_ADMIN {
        return true;
    }
    recipient.role == ROLE_CANDIDATE && recipient.cross_org_accessible
}

/// Messaging service over the store and the notification gateway.
pub struct MessagingService {
    pool: DbPool,
    gateway: Arc<EmailGateway>,
}

impl MessagingService {
    pub fn new(pool: DbPool, gateway: Arc<EmailGateway>) -> Self {
        Self { pool, gateway }
    }

    /// Send a message. Permission violations surface as
    /// [`CoreError::Forbidden`]; the new-message email notification is
    /// best-effort and never fails the send.
    pub async fn send_message(
        &self,
        sender_id: DbId,
        input: &NewMessage,
    ) -> Result<Message, CoreError> {
        let sender = UserRepo::find_by_id(&self.pool, sender_id)
            .await
            .map_err(|e| CoreError::Internal(e.to_string()))?;
        let recipient = UserRepo::find_by_id(&self.pool, input.recipient_id)
            .await
            .map_err(|e| CoreError::Internal(e.to_string()))?;

        let (sender, recipient) = match (sender, recipient) {
            (Some(sender), Some(recipient)) => (sender, recipient),
            _ => return Err(CoreError::Validation("Invalid sender or recipient".into())),
        };

        if !can_message(&sender, &recipient) {
            return Err(CoreError::Forbidden("Permission denied".into()));
        }

        let message = MessageRepo::insert(
            &self.pool,
            sender.id,
            recipient.id,
            &input.subject,
            &input.content,
            input.message_type.as_deref().unwrap_or(TYPE_DIRECT),
            input.priority.as_deref().unwrap_or(PRIORITY_NORMAL),
        )
        .await
        .map_err(|e| CoreError::Internal(e.to_string()))?;

        tracing::info!(
            message_id = message.id,
            sender_id = sender.id,
            recipient_id = recipient.id,
            "Message sent"
        );

        self.notify_recipient(&sender, &recipient, &message).await;
        Ok(message)
    }

    /// The user's inbox: latest message per conversation partner with
    /// unread counts, newest conversation first.
    pub async fn conversations(
        &self,
        user_id: DbId,
        limit: Option<i64>,
    ) -> Result<Vec<ConversationSummary>, sqlx::Error> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT);
        let latest = MessageRepo::latest_per_partner(&self.pool, user_id, limit).await?;
        let unread: HashMap<DbId, i64> = MessageRepo::unread_counts_by_sender(&self.pool, user_id)
            .await?
            .into_iter()
            .collect();

        let mut summaries = Vec::with_capacity(latest.len());
        for message in latest {
            let partner_id = message.partner_for(user_id);
            let Some(partner) = UserRepo::find_by_id(&self.pool, partner_id).await? else {
                tracing::warn!(partner_id, "Skipping conversation with missing partner");
                continue;
            };
            summaries.push(ConversationSummary {
                partner_id,
                partner_name: partner.display_name(),
                partner_role: partner.role,
                unread_count: unread.get(&partner_id).copied().unwrap_or(0),
                latest: message,
            });
        }
        Ok(summaries)
    }

    /// The two-way thread with a partner, oldest first. Reading the thread
    /// marks the partner's unread messages to this user as read.
    pub async fn thread(
        &self,
        user_id: DbId,
        partner_id: DbId,
        limit: Option<i64>,
    ) -> Result<Vec<Message>, sqlx::Error> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT);
        let marked = MessageRepo::mark_thread_read(&self.pool, user_id, partner_id).await?;
        if marked > 0 {
            tracing::debug!(user_id, partner_id, marked, "Marked thread messages read");
        }
        MessageRepo::thread_between(&self.pool, user_id, partner_id, limit).await
    }

    /// Preference-gated "you have a new message" email.
    async fn notify_recipient(&self, sender: &User, recipient: &User, message: &Message) {
        let context = std::collections::BTreeMap::from([
            ("user_name".to_string(), recipient.display_name()),
            ("sender_name".to_string(), sender.display_name()),
            ("subject".to_string(), message.subject.clone()),
            (
                "message".to_string(),
                format!(
                    "You have a new message from {}: {}",
                    sender.display_name(),
                    message.subject
                ),
            ),
        ]);
        let outcome = self
            .gateway
            .send(
                &recipient.email,
                &format!("New Message - {}", message.subject),
                "message_received",
                &context,
                Some(recipient.id),
            )
            .await;
        if !outcome.success && !outcome.skipped {
            tracing::warn!(
                to = %recipient.email,
                error = ?outcome.error,
                "Failed to send new-message notification"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(id: DbId, org: DbId, role: &str, cross_org: bool) -> User {
        User {
            id,
            username: format!("user{id}"),
            email: format!("user{id}@acme.com"),
            password_hash: String::new(),
            role: role.to_string(),
            organization_id: org,
            first_name: None,
            last_name: None,
            phone: None,
            job_title: None,
            bio: None,
            linkedin_url: None,
            profile_completed: true,
            is_organization_employee: false,
            cross_org_accessible: cross_org,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn same_organization_may_message() {
        let sender = user(1, 10, "recruiter", false);
        let recipient = user(2, 10, "candidate", false);
        assert!(can_message(&sender, &recipient));
    }

    #[test]
    fn super_admin_may_message_anyone() {
        let sender = user(1, 10, ROLE_SUPER_ADMIN, false);
        let recipient = user(2, 99, "recruiter", false);
        assert!(can_message(&sender, &recipient));
    }

    #[test]
    fn cross_org_candidate_is_reachable() {
        let sender = user(1, 10, "recruiter", false);
        let reachable = user(2, 99, ROLE_CANDIDATE, true);
        let hidden = user(3, 99, ROLE_CANDIDATE, false);
        assert!(can_message(&sender, &reachable));
        assert!(!can_message(&sender, &hidden));
    }

    #[test]
    fn cross_org_recruiter_is_not_reachable() {
        let sender = user(1, 10, "recruiter", false);
        let recipient = user(2, 99, "recruiter", true);
        assert!(!can_message(&sender, &recipient));
    }
}
