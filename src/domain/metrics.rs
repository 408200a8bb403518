use std::sync::Arc;
use std::time::Instant;

/// Abstraction for application metrics (counters, histograms, gauges).
pub trait Metrics: Send + Sync + 'static {
    // ---
    /// Render current metrics in Prometheus text format.
    fn render(&self) -> String;

    /// Record one completed HTTP request keyed by (method, path, status).
    fn record_http_request(&self, start: Instant, path: &str, method: &str, status: u16);
}

/// Type alias for any backend that implements Metrics.
pub type MetricsPtr = Arc<dyn Metrics>;
