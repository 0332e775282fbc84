//! Repository for the `technical_interview_assignments` table.

use ez2hire_core::types::DbId;
use sqlx::PgPool;

use crate::models::assignment::TechnicalInterviewAssignment;

const COLUMNS: &str = "id, interview_id, technical_person_id, candidate_id, organization_id, \
                        assigned_by, interview_date, status, assigned_at";

/// Read access for technical interview assignments.
pub struct AssignmentRepo;

impl AssignmentRepo {
    /// Find an assignment by internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<TechnicalInterviewAssignment>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM technical_interview_assignments WHERE id = $1");
        sqlx::query_as::<_, TechnicalInterviewAssignment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
