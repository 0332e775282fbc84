//! Route definitions.

pub mod health;

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/login                                  login (public)
///
/// /register/hr                                 HR registration workflow (public)
/// /validate/{form_kind}                        server-side form validation (public)
///
/// /notifications/preferences                   list preference rows
/// /notifications/preferences/{type}            upsert one preference
/// /notifications/stats                         delivery stats (admin)
///
/// /messages                                    send
/// /messages/conversations                      inbox aggregation
/// /messages/thread/{partner_id}                two-way thread (marks read)
///
/// /feedback/{id}/notify                        candidate decision email (staff)
/// /feedback/notify-bulk                        bulk decision emails (staff)
/// /interview-responses/{id}/summary            AI feedback summary
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/register/hr", post(handlers::registration::register_hr))
        .route(
            "/validate/{form_kind}",
            post(handlers::validation::validate_form),
        )
        .route(
            "/notifications/preferences",
            get(handlers::notification::list_preferences),
        )
        .route(
            "/notifications/preferences/{notification_type}",
            put(handlers::notification::update_preference),
        )
        .route(
            "/notifications/stats",
            get(handlers::notification::delivery_stats),
        )
        .route("/messages", post(handlers::messaging::send_message))
        .route(
            "/messages/conversations",
            get(handlers::messaging::conversations),
        )
        .route(
            "/messages/thread/{partner_id}",
            get(handlers::messaging::thread),
        )
        .route(
            "/feedback/{id}/notify",
            post(handlers::feedback::notify_decision),
        )
        .route(
            "/feedback/notify-bulk",
            post(handlers::feedback::notify_bulk),
        )
        .route(
            "/interview-responses/{id}/summary",
            get(handlers::feedback::response_summary),
        )
}
