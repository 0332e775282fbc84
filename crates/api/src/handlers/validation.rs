//! Handlers for the `/validate` resource.

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::Json;
use ez2hire_core::validation::rulesets::FormKind;
use ez2hire_workflows::validation::FormValidator;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/validate/{form_kind}
///
/// Validate a submitted field map against the named form's ruleset,
/// including store-backed uniqueness checks. Unknown form names are a 400.
pub async fn validate_form(
    State(state): State<AppState>,
    Path(form_kind): Path<String>,
    Json(fields): Json<HashMap<String, String>>,
) -> AppResult<Json<serde_json::Value>> {
    let kind = FormKind::parse(&form_kind)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown form type '{form_kind}'")))?;

    let validator = FormValidator::new(state.pool.clone());
    let report = validator.validate(kind, &fields).await?;

    Ok(Json(serde_json::json!({ "data": report })))
}
