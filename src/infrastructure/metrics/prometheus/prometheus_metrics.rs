//! Prometheus metrics implementation.
//!
//! This module provides a concrete implementation of the `Metrics` trait on
//! top of the `prometheus` crate. Collectors are created in `collectors.rs`
//! and registered in a registry built by `registry.rs`, which also owns the
//! text rendering used by the `/metrics` endpoint.
//!
//! Counters, histograms and gauges are atomic, so concurrent requests record
//! samples while a scrape gathers them without any extra locking.

use super::collectors::HttpCollectors;
use crate::domain::Metrics;
use anyhow::Result;
use prometheus::Registry;
use std::time::Instant;

/// Body served by `/metrics` when the registry cannot be encoded.
const RENDER_FAILED_NOTICE: &str = "# metrics rendering failed\n";

/// Falls back to a comment line so a scrape never gets an empty body.
fn text_or_notice(rendered: Result<String>) -> String {
    // ---
    rendered.unwrap_or_else(|err| {
        tracing::error!("Failed to render metrics: {err:#}");
        RENDER_FAILED_NOTICE.to_string()
    })
}

/// Prometheus-based metrics implementation.
///
/// Owns its registry rather than using the crate-global default one, so that
/// every series carries the configured `app` label and tests can build
/// independent instances.
pub struct PrometheusMetrics {
    registry: Registry,
    http: HttpCollectors,
}

impl PrometheusMetrics {
    // ---

    pub fn new(app_label: &str) -> Result<Self> {
        // ---
        tracing::info!("Creating Prometheus metrics");
        let registry = super::registry::new_registry(app_label)?;
        let http = HttpCollectors::register(&registry)?;

        Ok(PrometheusMetrics { registry, http })
    }

    /// Current value of `http_requests_total` for the given label triple.
    pub fn requests_total(&self, method: &str, path: &str, status: u16) -> u64 {
        // ---
        let status = status.to_string();
        self.http
            .requests_total
            .with_label_values(&[method, path, status.as_str()])
            .get()
    }

    /// Number of samples observed by the duration histogram for the triple.
    pub fn duration_sample_count(&self, method: &str, path: &str, status: u16) -> u64 {
        // ---
        let status = status.to_string();
        self.http
            .duration_ms
            .with_label_values(&[method, path, status.as_str()])
            .get_sample_count()
    }

    /// Most recent request duration, in milliseconds, for the triple.
    pub fn last_duration_ms(&self, method: &str, path: &str, status: u16) -> f64 {
        // ---
        let status = status.to_string();
        self.http
            .last_duration_ms
            .with_label_values(&[method, path, status.as_str()])
            .get()
    }
}

impl Metrics for PrometheusMetrics {
    fn render(&self) -> String {
        text_or_notice(super::registry::render(&self.registry))
    }

    fn record_http_request(&self, start: Instant, path: &str, method: &str, status: u16) {
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        tracing::debug!(method, path, status, elapsed_ms, "Recording HTTP request");
        self.http
            .observe(method, path, &status.to_string(), elapsed_ms);
    }
}
