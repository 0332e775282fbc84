//! Email delivery log and notification preference models.

use ez2hire_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Delivery log status values.
pub const STATUS_PENDING: &str = "pending";
pub const STATUS_SENT: &str = "sent";
pub const STATUS_FAILED: &str = "failed";
pub const STATUS_BOUNCED: &str = "bounced";
pub const STATUS_SKIPPED: &str = "skipped";

/// A row from the `email_notifications` table: the append-only delivery
/// log, one row per send attempt (sent, failed, or preference-skipped).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EmailNotification {
    pub id: DbId,
    pub user_id: Option<DbId>,
    pub to_email: String,
    pub subject: String,
    pub template_name: String,
    pub status: String,
    pub error_message: Option<String>,
    pub sent_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for appending a delivery log row.
#[derive(Debug, Clone)]
pub struct NewEmailNotification {
    pub user_id: Option<DbId>,
    pub to_email: String,
    pub subject: String,
    pub template_name: String,
    pub status: String,
    pub error_message: Option<String>,
}

/// A row from the `notification_preferences` table.
///
/// Absence of a row for (user, notification_type) means "enabled": the
/// platform is default-allow and only stores explicit opt-outs/overrides.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NotificationPreference {
    pub id: DbId,
    pub user_id: DbId,
    pub notification_type: String,
    pub enabled: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for updating a notification preference.
#[derive(Debug, Deserialize)]
pub struct UpdatePreference {
    pub enabled: bool,
}

/// Aggregated counts from today's slice of the delivery log.
#[derive(Debug, Clone, Default, FromRow, Serialize)]
pub struct DeliveryStats {
    pub today_sent: i64,
    pub today_failed: i64,
    pub today_skipped: i64,
}
