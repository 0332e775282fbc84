//! Handlers for the `/register` resource.

use axum::extract::State;
use axum::Json;
use ez2hire_workflows::registration::{RegistrationRequest, RegistrationService};

use crate::error::AppResult;
use crate::state::AppState;

/// POST /api/v1/register/hr
///
/// Run the HR registration/approval workflow. Public endpoint. The
/// workflow converts every internal fault into a structured outcome, so
/// this handler always answers 200 with the outcome body.
pub async fn register_hr(
    State(state): State<AppState>,
    Json(request): Json<RegistrationRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let service = RegistrationService::new(state.pool.clone(), state.gateway.clone());
    let outcome = service.register(&request).await;
    Ok(Json(serde_json::json!({ "data": outcome })))
}
