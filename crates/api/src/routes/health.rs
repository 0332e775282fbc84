//! Health check route.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::state::AppState;

/// Routes mounted at the root (not under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

/// GET /health
///
/// Liveness plus a database reachability check.
async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let database = match ez2hire_db::health_check(&state.pool).await {
        Ok(()) => "ok",
        Err(err) => {
            tracing::error!(error = %err, "Database health check failed");
            "unreachable"
        }
    };
    Json(serde_json::json!({
        "status": "ok",
        "database": database,
    }))
}
