use crate::domain::Metrics;
use std::time::Instant;

/// Body served by `/metrics` when collection is disabled.
const DISABLED_NOTICE: &str = "# metrics collection disabled\n";

/// No-op metrics implementation.
pub struct NoopMetrics;

impl NoopMetrics {
    pub fn new() -> Self {
        NoopMetrics
    }
}

impl Metrics for NoopMetrics {
    // ---
    fn render(&self) -> String {
        DISABLED_NOTICE.to_string()
    }
    fn record_http_request(&self, _: Instant, _: &str, _: &str, _: u16) {}
}
