// src/infrastructure/metrics/noop/mod.rs
mod noop_metrics;

pub use noop_metrics::NoopMetrics;
use std::sync::Arc;

/// Creates a new no-op metrics implementation.
///
/// Recordings are ignored. Useful for development, or wherever the
/// metrics listener is not scraped.
pub fn create() -> anyhow::Result<crate::domain::MetricsPtr> {
    tracing::info!("Metrics collection disabled (noop)");
    Ok(Arc::new(NoopMetrics::new()))
}
