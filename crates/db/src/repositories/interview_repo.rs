//! Repositories for the `interviews` and `interview_responses` tables.

use ez2hire_core::types::DbId;
use sqlx::PgPool;

use crate::models::interview::{Interview, InterviewResponse};

const INTERVIEW_COLUMNS: &str = "id, title, organization_id, recruiter_id, is_active, created_at";

const RESPONSE_COLUMNS: &str = "id, interview_id, candidate_id, organization_id, answers, \
                                ai_score, time_taken_minutes, completed_at";

/// Read access for interviews.
pub struct InterviewRepo;

impl InterviewRepo {
    /// Find an interview by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Interview>, sqlx::Error> {
        let query = format!("SELECT {INTERVIEW_COLUMNS} FROM interviews WHERE id = $1");
        sqlx::query_as::<_, Interview>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}

/// Read access for candidate interview responses.
pub struct InterviewResponseRepo;

impl InterviewResponseRepo {
    /// Find a response by internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<InterviewResponse>, sqlx::Error> {
        let query = format!("SELECT {RESPONSE_COLUMNS} FROM interview_responses WHERE id = $1");
        sqlx::query_as::<_, InterviewResponse>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all responses to an interview within one tenant.
    pub async fn list_for_interview(
        pool: &PgPool,
        interview_id: DbId,
        organization_id: DbId,
    ) -> Result<Vec<InterviewResponse>, sqlx::Error> {
        let query = format!(
            "SELECT {RESPONSE_COLUMNS} FROM interview_responses \
             WHERE interview_id = $1 AND organization_id = $2 \
             ORDER BY completed_at"
        );
        sqlx::query_as::<_, InterviewResponse>(&query)
            .bind(interview_id)
            .bind(organization_id)
            .fetch_all(pool)
            .await
    }
}
