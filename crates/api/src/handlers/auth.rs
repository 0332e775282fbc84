//! Handlers for the `/auth` resource.

use axum::extract::State;
use axum::Json;
use ez2hire_core::error::CoreError;
use ez2hire_db::models::user::UserResponse;
use ez2hire_db::repositories::UserRepo;
use ez2hire_workflows::password::verify_password;
use serde::Deserialize;

use crate::auth::jwt::generate_access_token;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// POST /api/v1/auth/login
///
/// Verify credentials and issue a JWT access token. The response never
/// distinguishes unknown usernames from wrong passwords.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let user = UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or_else(invalid_credentials)?;

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    let verified = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification failed: {e}")))?;
    if !verified {
        return Err(invalid_credentials());
    }

    let token = generate_access_token(user.id, &user.role, user.organization_id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(serde_json::json!({
        "data": {
            "token": token,
            "user": UserResponse::from(&user),
        }
    })))
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized("Invalid username or password".into()))
}
