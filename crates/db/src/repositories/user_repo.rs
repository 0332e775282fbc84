//! Repository for the `users` table.

use ez2hire_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, email, password_hash, role, organization_id, \
                        first_name, last_name, phone, job_title, bio, linkedin_url, \
                        profile_completed, is_organization_employee, cross_org_accessible, \
                        is_active, created_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, email, password_hash, role, organization_id,
                                first_name, last_name, phone, job_title, bio, linkedin_url,
                                profile_completed, is_organization_employee, cross_org_accessible)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.role)
            .bind(input.organization_id)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.phone)
            .bind(&input.job_title)
            .bind(&input.bio)
            .bind(&input.linkedin_url)
            .bind(input.profile_completed)
            .bind(input.is_organization_employee)
            .bind(input.cross_org_accessible)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the account registered under (email, organization). Emails are
    /// only unique within a tenant, so the organization id is required.
    pub async fn find_by_email_in_org(
        pool: &PgPool,
        email: &str,
        organization_id: DbId,
    ) -> Result<Option<User>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM users WHERE email = $1 AND organization_id = $2");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .bind(organization_id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by username (first match across tenants), used for login.
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1 ORDER BY id LIMIT 1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// List an organization's admin accounts.
    pub async fn find_admins(
        pool: &PgPool,
        organization_id: DbId,
    ) -> Result<Vec<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users \
             WHERE organization_id = $1 AND role = 'admin' AND is_active = true \
             ORDER BY id"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(organization_id)
            .fetch_all(pool)
            .await
    }

    /// Find the first active user with the given platform role.
    pub async fn find_first_by_role(
        pool: &PgPool,
        role: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users WHERE role = $1 AND is_active = true ORDER BY id LIMIT 1"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(role)
            .fetch_optional(pool)
            .await
    }

    /// Whether any account anywhere on the platform uses this email.
    /// Deliberately global: used by pre-registration validation where no
    /// organization context exists yet.
    pub async fn email_exists(pool: &PgPool, email: &str) -> Result<bool, sqlx::Error> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(pool)
                .await?;
        Ok(exists.0)
    }

    /// Whether any account anywhere on the platform uses this username.
    pub async fn username_exists(pool: &PgPool, username: &str) -> Result<bool, sqlx::Error> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
                .bind(username)
                .fetch_one(pool)
                .await?;
        Ok(exists.0)
    }

    /// Whether any account anywhere on the platform uses this phone number.
    pub async fn phone_exists(pool: &PgPool, phone: &str) -> Result<bool, sqlx::Error> {
        let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE phone = $1)")
            .bind(phone)
            .fetch_one(pool)
            .await?;
        Ok(exists.0)
    }
}
