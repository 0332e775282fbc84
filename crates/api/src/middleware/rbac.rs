//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does
//! not meet the minimum requirement.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use ez2hire_core::error::CoreError;
use ez2hire_core::roles::{is_hiring_staff, ROLE_ADMIN, ROLE_SUPER_ADMIN};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` or `super_admin` role. Rejects with 403 otherwise.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_ADMIN && user.role != ROLE_SUPER_ADMIN {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}

/// Requires a hiring-staff role (`recruiter`, `admin`, or `super_admin`).
/// Rejects with 403 Forbidden otherwise.
pub struct RequireStaff(pub AuthUser);

impl FromRequestParts<AppState> for RequireStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !is_hiring_staff(&user.role) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Recruiter or admin role required".into(),
            )));
        }
        Ok(RequireStaff(user))
    }
}
