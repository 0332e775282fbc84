//! Handlers for the `/messages` resource.

use axum::extract::{Path, Query, State};
use axum::Json;
use ez2hire_core::types::DbId;
use ez2hire_db::models::message::NewMessage;
use ez2hire_workflows::messaging::MessagingService;
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Query parameters for paging list endpoints.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub limit: Option<i64>,
}

/// Maximum page size for message listings.
const MAX_LIMIT: i64 = 100;

fn clamp(limit: Option<i64>) -> Option<i64> {
    limit.map(|l| l.clamp(1, MAX_LIMIT))
}

/// POST /api/v1/messages
///
/// Send a message to another user. Cross-tenant sends are rejected unless
/// permitted by the messaging policy.
pub async fn send_message(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<NewMessage>,
) -> AppResult<Json<serde_json::Value>> {
    let service = MessagingService::new(state.pool.clone(), state.gateway.clone());
    let message = service.send_message(auth.user_id, &input).await?;

    Ok(Json(serde_json::json!({
        "data": {
            "message_id": message.id,
            "sent_at": message.created_at,
        }
    })))
}

/// GET /api/v1/messages/conversations
///
/// The authenticated user's inbox: latest message per partner with unread
/// counts.
pub async fn conversations(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<PageQuery>,
) -> AppResult<Json<serde_json::Value>> {
    let service = MessagingService::new(state.pool.clone(), state.gateway.clone());
    let conversations = service
        .conversations(auth.user_id, clamp(params.limit))
        .await?;
    Ok(Json(serde_json::json!({ "data": conversations })))
}

/// GET /api/v1/messages/thread/{partner_id}
///
/// The two-way thread with a partner. Fetching it marks the partner's
/// unread messages to the authenticated user as read.
pub async fn thread(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(partner_id): Path<DbId>,
    Query(params): Query<PageQuery>,
) -> AppResult<Json<serde_json::Value>> {
    let service = MessagingService::new(state.pool.clone(), state.gateway.clone());
    let messages = service
        .thread(auth.user_id, partner_id, clamp(params.limit))
        .await?;
    Ok(Json(serde_json::json!({ "data": messages })))
}
