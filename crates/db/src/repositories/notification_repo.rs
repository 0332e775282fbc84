//! Repositories for the `email_notifications` delivery log and the
//! `notification_preferences` table.

use ez2hire_core::types::DbId;
use sqlx::PgPool;

use crate::models::notification::{
    DeliveryStats, EmailNotification, NewEmailNotification, NotificationPreference,
};

const LOG_COLUMNS: &str =
    "id, user_id, to_email, subject, template_name, status, error_message, sent_at, created_at";

const PREF_COLUMNS: &str = "id, user_id, notification_type, enabled, created_at, updated_at";

/// Append-only access to the email delivery log.
pub struct EmailNotificationRepo;

impl EmailNotificationRepo {
    /// Append one delivery log row. `sent_at` is stamped only for
    /// successfully sent attempts.
    pub async fn insert(
        pool: &PgPool,
        input: &NewEmailNotification,
    ) -> Result<EmailNotification, sqlx::Error> {
        let query = format!(
            "INSERT INTO email_notifications
                (user_id, to_email, subject, template_name, status, error_message, sent_at)
             VALUES ($1, $2, $3, $4, $5, $6,
                     CASE WHEN $5 = 'sent' THEN NOW() ELSE NULL END)
             RETURNING {LOG_COLUMNS}"
        );
        sqlx::query_as::<_, EmailNotification>(&query)
            .bind(input.user_id)
            .bind(&input.to_email)
            .bind(&input.subject)
            .bind(&input.template_name)
            .bind(&input.status)
            .bind(&input.error_message)
            .fetch_one(pool)
            .await
    }

    /// Delivery counts for the current day.
    pub async fn today_stats(pool: &PgPool) -> Result<DeliveryStats, sqlx::Error> {
        sqlx::query_as::<_, DeliveryStats>(
            "SELECT
                 COUNT(*) FILTER (WHERE status = 'sent')    AS today_sent,
                 COUNT(*) FILTER (WHERE status = 'failed')  AS today_failed,
                 COUNT(*) FILTER (WHERE status = 'skipped') AS today_skipped
             FROM email_notifications
             WHERE created_at >= date_trunc('day', NOW())",
        )
        .fetch_one(pool)
        .await
    }
}

/// Access to per-user, per-notification-type preference rows.
pub struct NotificationPreferenceRepo;

impl NotificationPreferenceRepo {
    /// Get the preference row for (user, notification_type), if any.
    /// No row means the notification is enabled (default-allow).
    pub async fn find(
        pool: &PgPool,
        user_id: DbId,
        notification_type: &str,
    ) -> Result<Option<NotificationPreference>, sqlx::Error> {
        let query = format!(
            "SELECT {PREF_COLUMNS} FROM notification_preferences \
             WHERE user_id = $1 AND notification_type = $2"
        );
        sqlx::query_as::<_, NotificationPreference>(&query)
            .bind(user_id)
            .bind(notification_type)
            .fetch_optional(pool)
            .await
    }

    /// List all preference rows for a user.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<NotificationPreference>, sqlx::Error> {
        let query = format!(
            "SELECT {PREF_COLUMNS} FROM notification_preferences \
             WHERE user_id = $1 ORDER BY notification_type"
        );
        sqlx::query_as::<_, NotificationPreference>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Insert or update a preference in a single round-trip.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        notification_type: &str,
        enabled: bool,
    ) -> Result<NotificationPreference, sqlx::Error> {
        let query = format!(
            "INSERT INTO notification_preferences (user_id, notification_type, enabled)
             VALUES ($1, $2, $3)
             ON CONFLICT (user_id, notification_type) DO UPDATE SET
                enabled = EXCLUDED.enabled,
                updated_at = NOW()
             RETURNING {PREF_COLUMNS}"
        );
        sqlx::query_as::<_, NotificationPreference>(&query)
            .bind(user_id)
            .bind(notification_type)
            .bind(enabled)
            .fetch_one(pool)
            .await
    }
}
