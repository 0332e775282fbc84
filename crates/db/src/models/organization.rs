//! Organization (tenant) entity model and DTOs.

use ez2hire_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `organizations` table. The tenant boundary: users and
/// interviews belong to exactly one organization.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Organization {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub subscription_plan: String,
    pub is_active: bool,
    pub created_at: Timestamp,
}

/// DTO for creating a new organization.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrganization {
    pub name: String,
    pub slug: String,
    pub subscription_plan: String,
}
