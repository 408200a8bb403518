mod collectors;
mod prometheus_metrics;
mod registry;

pub use prometheus_metrics::PrometheusMetrics;
use std::sync::Arc;

/// Creates a new Prometheus metrics implementation.
///
/// Collectors live in a registry owned by the returned instance; build it
/// once at startup and share the pointer between the application router
/// (recording) and the metrics router (scraping).
pub fn create(app_label: &str) -> anyhow::Result<crate::domain::MetricsPtr> {
    tracing::info!(app = app_label, "Initializing Prometheus metrics");

    Ok(Arc::new(PrometheusMetrics::new(app_label)?))
}
