//! Peer-to-peer message entity model and DTOs.

use ez2hire_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Message kind values for the `message_type` column.
pub const TYPE_DIRECT: &str = "direct";
pub const TYPE_APPLICATION: &str = "application";
pub const TYPE_INTERVIEW: &str = "interview";
pub const TYPE_SYSTEM: &str = "system";

/// Priority values for the `priority` column.
pub const PRIORITY_NORMAL: &str = "normal";

/// A row from the `messages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Message {
    pub id: DbId,
    pub sender_id: DbId,
    pub recipient_id: DbId,
    pub subject: String,
    pub content: String,
    pub message_type: String,
    pub priority: String,
    pub is_read: bool,
    pub read_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl Message {
    /// The other participant of the conversation, from `user_id`'s side.
    pub fn partner_for(&self, user_id: DbId) -> DbId {
        if self.sender_id == user_id {
            self.recipient_id
        } else {
            self.sender_id
        }
    }
}

/// DTO for sending a new message.
#[derive(Debug, Clone, Deserialize)]
pub struct NewMessage {
    pub recipient_id: DbId,
    pub subject: String,
    pub content: String,
    /// Defaults to [`TYPE_DIRECT`].
    pub message_type: Option<String>,
    /// Defaults to [`PRIORITY_NORMAL`].
    pub priority: Option<String>,
}

/// One inbox row: the latest message exchanged with a partner plus the
/// number of unread messages from them.
#[derive(Debug, Clone, Serialize)]
pub struct ConversationSummary {
    pub partner_id: DbId,
    pub partner_name: String,
    pub partner_role: String,
    pub latest: Message,
    pub unread_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn partner_is_the_other_side() {
        let msg = Message {
            id: 1,
            sender_id: 10,
            recipient_id: 20,
            subject: String::new(),
            content: String::new(),
            message_type: TYPE_DIRECT.to_string(),
            priority: PRIORITY_NORMAL.to_string(),
            is_read: false,
            read_at: None,
            created_at: Utc::now(),
        };
        assert_eq!(msg.partner_for(10), 20);
        assert_eq!(msg.partner_for(20), 10);
    }
}
