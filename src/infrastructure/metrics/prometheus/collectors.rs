use anyhow::Result;
use prometheus::{GaugeVec, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry};

/// Label names shared by every HTTP series.
pub const HTTP_LABELS: [&str; 3] = ["method", "path", "status"];

/// Latency buckets for the request duration histogram, in milliseconds.
pub const DURATION_BUCKETS_MS: [f64; 10] =
    [0.1, 5.0, 15.0, 50.0, 100.0, 200.0, 300.0, 400.0, 500.0, 1000.0];

/// HTTP request collectors, all keyed by the (method, path, status) triple.
pub struct HttpCollectors {
    pub(super) requests_total: IntCounterVec,
    pub(super) duration_ms: HistogramVec,
    pub(super) last_duration_ms: GaugeVec,
}

impl HttpCollectors {
    // ---

    /// Create the collectors and register them with `registry`.
    pub fn register(registry: &Registry) -> Result<Self> {
        // ---
        let requests_total = IntCounterVec::new(
            Opts::new("http_requests_total", "Total number of HTTP requests"),
            &HTTP_LABELS,
        )?;
        let duration_ms = HistogramVec::new(
            HistogramOpts::new(
                "http_total_requests_duration_ms",
                "Duration of all HTTP requests in ms",
            )
            .buckets(DURATION_BUCKETS_MS.to_vec()),
            &HTTP_LABELS,
        )?;
        let last_duration_ms = GaugeVec::new(
            Opts::new(
                "http_last_request_duration",
                "Response time of the last request in ms",
            ),
            &HTTP_LABELS,
        )?;

        registry.register(Box::new(requests_total.clone()))?;
        registry.register(Box::new(duration_ms.clone()))?;
        registry.register(Box::new(last_duration_ms.clone()))?;

        Ok(Self {
            requests_total,
            duration_ms,
            last_duration_ms,
        })
    }

    /// Count one request and record its latency.
    pub fn observe(&self, method: &str, path: &str, status: &str, elapsed_ms: f64) {
        // ---
        let labels = [method, path, status];
        self.requests_total.with_label_values(&labels).inc();
        self.duration_ms.with_label_values(&labels).observe(elapsed_ms);
        self.last_duration_ms.with_label_values(&labels).set(elapsed_ms);
    }
}
