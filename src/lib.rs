// src/lib.rs
use anyhow::Result;
use app_state::AppState;
use axum::{
    routing::{get, put},
    Router,
};

use domain::MetricsPtr;
use handlers::{
    create_deal, health_check, list_deals, metrics_handler, root_handler, update_deal,
};
use tracing_subscriber::EnvFilter;

// Public exports (visible outside this module)
pub mod domain;

// Internal-only exports (sibling access within this module)
mod app_state;
mod config;
mod handlers;
mod infrastructure;
mod middleware;

#[cfg(test)]
mod test_support;

pub use config::*;

// Publicly expose the infrastructure creation functions
pub use infrastructure::{
    create_noop_metrics, // ---
    create_pipedrive_client,
    create_prom_metrics,
    PipedriveClient,
    PrometheusMetrics,
};

/// The two routers served by the gateway, each on its own listener.
pub struct Routers {
    /// Deal relay, root banner and health check.
    pub app: Router,

    /// `GET /metrics` scrape endpoint.
    pub metrics: Router,
}

/// Install the global tracing subscriber.
///
/// Honours `RUST_LOG` and defaults to `info`. Safe to call more than once;
/// later calls are ignored.
pub fn init_tracing() {
    // ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).try_init().ok();
}

/// Build the metrics implementation selected by configuration.
pub fn create_metrics(config: &MetricsConfig) -> Result<MetricsPtr> {
    // ---
    match config.backend {
        MetricsBackend::Prometheus => create_prom_metrics(&config.app_label),
        MetricsBackend::Noop => create_noop_metrics(),
    }
}

/// Build both routers from an already loaded configuration.
///
/// The metrics instance is created here, once, and shared by the recording
/// middleware and the scrape endpoint.
pub fn build_routers(config: &AppConfig) -> Result<Routers> {
    // ---
    let metrics = create_metrics(&config.metrics)?;
    let deals = create_pipedrive_client(&config.upstream)?;

    let app_state = AppState::new(deals, metrics.clone());

    Ok(Routers {
        app: app_router(app_state),
        metrics: metrics_router(metrics),
    })
}

/// Build both routers with configuration loaded from the environment.
pub fn create_routers() -> Result<Routers> {
    // ---
    init_tracing();
    let config = AppConfig::from_env()?;
    build_routers(&config)
}

/// Application routes, each wrapped by the request metrics middleware.
pub(crate) fn app_router(app_state: AppState) -> Router {
    // ---
    let metrics = app_state.metrics().clone();

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_check))
        .route("/deals", get(list_deals).post(create_deal))
        .route("/deals/{id}", put(update_deal))
        .route_layer(axum::middleware::from_fn_with_state(
            metrics,
            middleware::track_metrics,
        ))
        .with_state(app_state)
}

/// Scrape endpoint for the metrics listener.
pub(crate) fn metrics_router(metrics: MetricsPtr) -> Router {
    // ---
    Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(metrics)
}
