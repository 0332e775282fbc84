//! Technical interview assignment entity model.

use ez2hire_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Assignment lifecycle status values.
pub const STATUS_PENDING: &str = "pending";
pub const STATUS_COMPLETED: &str = "completed";
pub const STATUS_CANCELLED: &str = "cancelled";

/// A row from the `technical_interview_assignments` table: links a technical
/// interviewer, a candidate, an interview, and the assigning HR user.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TechnicalInterviewAssignment {
    pub id: DbId,
    pub interview_id: DbId,
    pub technical_person_id: DbId,
    pub candidate_id: DbId,
    pub organization_id: DbId,
    pub assigned_by: DbId,
    pub interview_date: Timestamp,
    pub status: String,
    pub assigned_at: Timestamp,
}
