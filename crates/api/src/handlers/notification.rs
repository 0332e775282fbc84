//! Handlers for the `/notifications` resource: per-user preferences and
//! the admin-facing delivery stats.

use axum::extract::{Path, State};
use axum::Json;
use ez2hire_db::models::notification::UpdatePreference;
use ez2hire_db::repositories::NotificationPreferenceRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// GET /api/v1/notifications/preferences
///
/// List the authenticated user's explicit preference rows. Notification
/// types without a row are enabled by default.
pub async fn list_preferences(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    let preferences =
        NotificationPreferenceRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(serde_json::json!({ "data": preferences })))
}

/// PUT /api/v1/notifications/preferences/{notification_type}
///
/// Create or update the authenticated user's preference for one
/// notification type.
pub async fn update_preference(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(notification_type): Path<String>,
    Json(input): Json<UpdatePreference>,
) -> AppResult<Json<serde_json::Value>> {
    let preference = NotificationPreferenceRepo::upsert(
        &state.pool,
        auth.user_id,
        &notification_type,
        input.enabled,
    )
    .await?;
    Ok(Json(serde_json::json!({ "data": preference })))
}

/// GET /api/v1/notifications/stats
///
/// Today's delivery-log counts. Admin only.
pub async fn delivery_stats(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    let stats = state.gateway.delivery_stats().await?;
    Ok(Json(serde_json::json!({ "data": stats })))
}
