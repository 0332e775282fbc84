use std::sync::Arc;

use ez2hire_ai::FeedbackSummarizer;
use ez2hire_notify::EmailGateway;

use crate::config::ServerConfig;

/// Shared application state available to all axum handlers via
/// `State<AppState>`. Cheaply cloneable: inner data is behind `Arc` or is
/// already `Clone`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: ez2hire_db::DbPool,
    /// Server configuration (JWT secret, timeouts, CORS).
    pub config: Arc<ServerConfig>,
    /// The platform's single outbound-email entry point.
    pub gateway: Arc<EmailGateway>,
    /// AI interview feedback summarizer.
    pub summarizer: Arc<FeedbackSummarizer>,
}
