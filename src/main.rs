use anyhow::{Context, Result};
use deals_gateway::{build_routers, init_tracing, AppConfig, Routers};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // ---
    // A missing .env is fine; the environment may already be populated.
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    info!(
        upstream = %config.upstream.base_url,
        metrics = ?config.metrics.backend,
        "Starting deals gateway v{}...",
        env!("CARGO_PKG_VERSION")
    );

    let Routers { app, metrics } = build_routers(&config)?;

    // Bind failures are fatal.
    let app_addr = config.server.app_addr();
    let app_listener = TcpListener::bind(&app_addr)
        .await
        .with_context(|| format!("failed to bind application server to {app_addr}"))?;
    let metrics_addr = config.server.metrics_addr();
    let metrics_listener = TcpListener::bind(&metrics_addr)
        .await
        .with_context(|| format!("failed to bind metrics server to {metrics_addr}"))?;

    info!("Application server listening on http://{}", app_listener.local_addr()?);
    info!("Metrics server listening on http://{}/metrics", metrics_listener.local_addr()?);

    let app_server = async move {
        axum::serve(app_listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("application server failed")
    };
    let metrics_server = async move {
        axum::serve(metrics_listener, metrics)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("metrics server failed")
    };

    tokio::try_join!(app_server, metrics_server)?;

    info!("Shut down cleanly");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    // ---
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!("Failed to listen for SIGTERM: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
