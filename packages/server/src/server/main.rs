// Main entry point for API server

use std::sync::Arc;

use anyhow::{Context, Result};
use staysafe_core::kernel::{OpenAiCompletion, ServerDeps};
use staysafe_core::{server::build_app, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,staysafe_core=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting StaySafe API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        model = %config.openai_model,
        base_url = %config.openai_base_url,
        timeout_secs = config.completion_timeout.as_secs(),
        max_retries = config.completion_max_retries,
        allowed_origins = ?config.allowed_origins,
        strict_status_vocabulary = config.strict_status_vocabulary,
        "Configuration loaded"
    );

    // Completion service
    let ai = OpenAiCompletion::from_config(&config)?;
    let deps = ServerDeps::new(Arc::new(ai), config.completion_deadline)
        .with_strict_status_vocabulary(config.strict_status_vocabulary);

    // Build application
    let app = build_app(deps, &config.allowed_origins)?;

    // Start server
    let addr = config.bind_address();
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
