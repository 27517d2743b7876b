use anyhow::Context;
use dotenvy::dotenv;
use rolegate::config::ServerConfig;
use rolegate::router::init_router;
use rolegate::state::init_app_state;
use rolegate_observability::{init_metrics, init_tracing, metrics_router};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let _log_guards = init_tracing()?;
    let metrics_handle = init_metrics()?;

    let state = init_app_state().await?;
    let mut app = init_router(state);
    if let Some(handle) = metrics_handle {
        app = app.merge(metrics_router(handle));
    }

    let server_config = ServerConfig::from_env();
    let address = server_config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    info!("Server running on http://{}", address);
    info!("Swagger UI available at http://{}/swagger-ui", address);
    info!("Scalar UI available at http://{}/scalar", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
