//! Interview and interview-response entity models.

use ez2hire_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `interviews` table. Consumed by ID here; the title feeds
/// candidate-facing decision emails.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Interview {
    pub id: DbId,
    pub title: String,
    pub organization_id: DbId,
    pub recruiter_id: DbId,
    pub is_active: bool,
    pub created_at: Timestamp,
}

/// A candidate's submitted answers for an interview, with the automated
/// first-pass score. Input to the AI feedback summarizer.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InterviewResponse {
    pub id: DbId,
    pub interview_id: DbId,
    pub candidate_id: DbId,
    pub organization_id: DbId,
    /// Question-keyed answer texts.
    pub answers: serde_json::Value,
    pub ai_score: f64,
    pub time_taken_minutes: Option<i32>,
    pub completed_at: Timestamp,
}
