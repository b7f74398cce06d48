use anyhow::{Context, Result};
use dotenvy::dotenv;
use tracing::info;

use authgate::logging::{LoggingConfig, init_tracing, shutdown_tracer};
use authgate::metrics::init_metrics;
use authgate::router::init_router;
use authgate::state::init_app_state;
use authgate_config::ServerConfig;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    init_tracing(&LoggingConfig::from_env())?;

    let server_config = ServerConfig::from_env()?;
    let metrics = init_metrics()?;
    let state = init_app_state(&server_config).await?;
    let app = init_router(state, metrics);

    let address = server_config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    info!(address = %address, "Server listening");
    info!("Swagger UI available at http://{}/swagger-ui", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    shutdown_tracer();
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
