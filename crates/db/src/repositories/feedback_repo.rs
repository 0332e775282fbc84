//! Repository for the `technical_interview_feedback` table.

use ez2hire_core::types::DbId;
use sqlx::PgPool;

use crate::models::feedback::TechnicalInterviewFeedback;

const COLUMNS: &str = "id, assignment_id, technical_person_id, candidate_id, interview_id, \
                        organization_id, decision, technical_comments, communication_comments, \
                        overall_comments, technical_skills_rating, problem_solving_rating, \
                        communication_rating, cultural_fit_rating, submitted_at, \
                        candidate_notified_at";

/// Access to technical interview feedback rows.
pub struct FeedbackRepo;

impl FeedbackRepo {
    /// Find a feedback row by internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<TechnicalInterviewFeedback>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM technical_interview_feedback WHERE id = $1");
        sqlx::query_as::<_, TechnicalInterviewFeedback>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Stamp `candidate_notified_at` for a row that has not been announced
    /// yet. Returns `false` if the row was already stamped (or missing), so
    /// a concurrent second caller observes that it lost.
    pub async fn mark_candidate_notified(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE technical_interview_feedback \
             SET candidate_notified_at = NOW() \
             WHERE id = $1 AND candidate_notified_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
