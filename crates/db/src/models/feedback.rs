//! Technical interview feedback entity model.

use ez2hire_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `technical_interview_feedback` table: one per completed
/// assignment, written once by the technical interviewer.
///
/// `decision` is stored as a string column; parse it with
/// [`ez2hire_core::decision::Decision::parse`] at the workflow edge.
/// `candidate_notified_at` is stamped by the decision notification workflow
/// so a feedback row is never announced to the candidate twice.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TechnicalInterviewFeedback {
    pub id: DbId,
    pub assignment_id: DbId,
    pub technical_person_id: DbId,
    pub candidate_id: DbId,
    pub interview_id: DbId,
    pub organization_id: DbId,
    pub decision: String,
    pub technical_comments: Option<String>,
    pub communication_comments: Option<String>,
    pub overall_comments: Option<String>,
    pub technical_skills_rating: Option<i32>,
    pub problem_solving_rating: Option<i32>,
    pub communication_rating: Option<i32>,
    pub cultural_fit_rating: Option<i32>,
    pub submitted_at: Timestamp,
    pub candidate_notified_at: Option<Timestamp>,
}
