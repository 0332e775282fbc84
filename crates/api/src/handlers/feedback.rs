//! Handlers for interview feedback decisions and AI summaries.

use axum::extract::{Path, State};
use axum::Json;
use ez2hire_core::error::CoreError;
use ez2hire_core::roles::{is_hiring_staff, ROLE_CANDIDATE};
use ez2hire_core::types::DbId;
use ez2hire_db::repositories::InterviewResponseRepo;
use ez2hire_workflows::decision::DecisionNotifier;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::state::AppState;

/// POST /api/v1/feedback/{id}/notify
///
/// Send the candidate-facing decision email for one feedback row. Staff
/// only. `sent` is `true` only when exactly one email was delivered.
pub async fn notify_decision(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(feedback_id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let notifier = DecisionNotifier::new(state.pool.clone(), state.gateway.clone());
    let sent = notifier.notify_decision(feedback_id, staff.user_id).await;
    Ok(Json(serde_json::json!({ "data": { "sent": sent } })))
}

#[derive(Debug, Deserialize)]
pub struct BulkNotifyRequest {
    pub feedback_ids: Vec<DbId>,
}

/// POST /api/v1/feedback/notify-bulk
///
/// Send decision emails for several feedback rows with per-item isolation.
/// Counts in the response always sum to the number of submitted ids.
pub async fn notify_bulk(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<BulkNotifyRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let notifier = DecisionNotifier::new(state.pool.clone(), state.gateway.clone());
    let report = notifier
        .notify_bulk(&input.feedback_ids, staff.user_id)
        .await;
    Ok(Json(serde_json::json!({ "data": report })))
}

/// GET /api/v1/interview-responses/{id}/summary
///
/// AI summary of one interview response. Candidates may only read their
/// own; staff only within their organization.
pub async fn response_summary(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(response_id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let response = InterviewResponseRepo::find_by_id(&state.pool, response_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "InterviewResponse",
            id: response_id,
        }))?;

    let allowed = if auth.role == ROLE_CANDIDATE {
        response.candidate_id == auth.user_id
    } else if is_hiring_staff(&auth.role) {
        response.organization_id == auth.organization_id
    } else {
        false
    };
    if !allowed {
        return Err(AppError::Core(CoreError::Forbidden(
            "Permission denied".into(),
        )));
    }

    let summary = state.summarizer.summarize(response_id).await?;
    Ok(Json(serde_json::json!({ "data": summary })))
}
