//! Repository for the `organizations` table.

use ez2hire_core::types::DbId;
use sqlx::PgPool;

use crate::is_unique_violation;
use crate::models::organization::{CreateOrganization, Organization};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, slug, subscription_plan, is_active, created_at";

/// Provides CRUD operations for organizations.
pub struct OrganizationRepo;

impl OrganizationRepo {
    /// Find an organization by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Organization>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM organizations WHERE id = $1");
        sqlx::query_as::<_, Organization>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an organization by its unique name.
    pub async fn find_by_name(
        pool: &PgPool,
        name: &str,
    ) -> Result<Option<Organization>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM organizations WHERE name = $1");
        sqlx::query_as::<_, Organization>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new organization, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateOrganization,
    ) -> Result<Organization, sqlx::Error> {
        let query = format!(
            "INSERT INTO organizations (name, slug, subscription_plan)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Organization>(&query)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(&input.subscription_plan)
            .fetch_one(pool)
            .await
    }

    /// Idempotent lookup-or-create by name.
    ///
    /// Under concurrent first-time calls two requests may both miss the read
    /// and race the insert; the unique constraint on `name` makes the loser
    /// fail with 23505, which is recovered by re-reading the winner's row.
    pub async fn get_or_create(
        pool: &PgPool,
        input: &CreateOrganization,
    ) -> Result<Organization, sqlx::Error> {
        if let Some(existing) = Self::find_by_name(pool, &input.name).await? {
            return Ok(existing);
        }

        match Self::create(pool, input).await {
            Ok(created) => Ok(created),
            Err(err) if is_unique_violation(&err) => {
                tracing::debug!(name = %input.name, "Lost organization create race, re-reading");
                Self::find_by_name(pool, &input.name)
                    .await?
                    .ok_or(sqlx::Error::RowNotFound)
            }
            Err(err) => Err(err),
        }
    }
}
