//! Repository for the `messages` table.

use ez2hire_core::types::DbId;
use sqlx::PgPool;

use crate::models::message::Message;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, sender_id, recipient_id, subject, content, message_type, priority, \
                        is_read, read_at, created_at";

/// Provides message persistence and inbox queries.
pub struct MessageRepo;

impl MessageRepo {
    /// Insert a new message, returning the created row.
    pub async fn insert(
        pool: &PgPool,
        sender_id: DbId,
        recipient_id: DbId,
        subject: &str,
        content: &str,
        message_type: &str,
        priority: &str,
    ) -> Result<Message, sqlx::Error> {
        let query = format!(
            "INSERT INTO messages (sender_id, recipient_id, subject, content, message_type, priority)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(sender_id)
            .bind(recipient_id)
            .bind(subject)
            .bind(content)
            .bind(message_type)
            .bind(priority)
            .fetch_one(pool)
            .await
    }

    /// The most recent message per conversation partner for a user,
    /// newest conversation first.
    pub async fn latest_per_partner(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
    ) -> Result<Vec<Message>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM (
                 SELECT DISTINCT ON (
                     CASE WHEN m.sender_id = $1 THEN m.recipient_id ELSE m.sender_id END
                 ) m.*
                 FROM messages m
                 WHERE m.sender_id = $1 OR m.recipient_id = $1
                 ORDER BY
                     CASE WHEN m.sender_id = $1 THEN m.recipient_id ELSE m.sender_id END,
                     m.created_at DESC
             ) latest
             ORDER BY created_at DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(user_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Unread message counts for a user, grouped by sender.
    pub async fn unread_counts_by_sender(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<(DbId, i64)>, sqlx::Error> {
        sqlx::query_as::<_, (DbId, i64)>(
            "SELECT sender_id, COUNT(*) FROM messages \
             WHERE recipient_id = $1 AND is_read = false \
             GROUP BY sender_id",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// The two-way thread between a user and a partner, oldest first.
    pub async fn thread_between(
        pool: &PgPool,
        user_id: DbId,
        partner_id: DbId,
        limit: i64,
    ) -> Result<Vec<Message>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM (
                 SELECT {COLUMNS} FROM messages
                 WHERE (sender_id = $1 AND recipient_id = $2)
                    OR (sender_id = $2 AND recipient_id = $1)
                 ORDER BY created_at DESC
                 LIMIT $3
             ) page
             ORDER BY created_at"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(user_id)
            .bind(partner_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Mark every unread message from `partner_id` to `user_id` as read,
    /// stamping `read_at`. Returns the number of rows updated.
    pub async fn mark_thread_read(
        pool: &PgPool,
        user_id: DbId,
        partner_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE messages SET is_read = true, read_at = NOW() \
             WHERE recipient_id = $1 AND sender_id = $2 AND is_read = false",
        )
        .bind(user_id)
        .bind(partner_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
