use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ez2hire_ai::{FeedbackSummarizer, LlmClient};
use ez2hire_api::config::ServerConfig;
use ez2hire_api::router::build_app_router;
use ez2hire_api::state::AppState;
use ez2hire_notify::{EmailGateway, Mailer, SmtpConfig, TemplateStore};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ez2hire_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = ez2hire_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    ez2hire_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    // --- Email gateway ---
    let smtp_config = SmtpConfig::from_env();
    tracing::info!(host = %smtp_config.host, port = smtp_config.port, "Loaded SMTP configuration");
    let gateway = Arc::new(EmailGateway::new(
        pool.clone(),
        Mailer::new(smtp_config),
        TemplateStore::from_env(),
    ));

    // --- AI summarizer ---
    let llm_api_key = std::env::var("LLM_API_KEY").unwrap_or_else(|_| {
        tracing::warn!("LLM_API_KEY not set; AI summaries will fall back");
        String::new()
    });
    let summarizer = Arc::new(FeedbackSummarizer::new(
        pool.clone(),
        LlmClient::new(llm_api_key),
    ));

    // --- App state + router ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        gateway,
        summarizer,
    };
    let app = build_app_router(state, &config);

    // --- Serve ---
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Invalid HOST/PORT combination");
    tracing::info!(%addr, "Starting HTTP server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind server address");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Resolve when SIGINT (Ctrl-C) or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}
