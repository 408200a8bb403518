//! Registry construction and Prometheus text rendering.

use anyhow::{Context, Result};
use prometheus::{Encoder, Registry, TextEncoder};
use std::collections::HashMap;

/// Creates a registry whose series all carry a constant `app` label.
///
/// The process collector (CPU, memory, open fds, start time) is registered
/// alongside, where the platform supports it.
pub fn new_registry(app_label: &str) -> Result<Registry> {
    // ---
    let const_labels = HashMap::from([("app".to_string(), app_label.to_string())]);
    let registry = Registry::new_custom(None, Some(const_labels))
        .context("failed to create metrics registry")?;

    register_process_collector(&registry)?;

    Ok(registry)
}

#[cfg(target_os = "linux")]
fn register_process_collector(registry: &Registry) -> Result<()> {
    // ---
    let collector = prometheus::process_collector::ProcessCollector::for_self();
    registry
        .register(Box::new(collector))
        .context("failed to register process collector")
}

#[cfg(not(target_os = "linux"))]
fn register_process_collector(_registry: &Registry) -> Result<()> {
    tracing::debug!("Process metrics are only collected on Linux");
    Ok(())
}

/// Render everything gathered from `registry` in Prometheus text format.
pub fn render(registry: &Registry) -> Result<String> {
    // ---
    let mut buffer = Vec::new();
    TextEncoder::new()
        .encode(&registry.gather(), &mut buffer)
        .context("failed to encode metrics")?;

    String::from_utf8(buffer).context("encoded metrics are not valid UTF-8")
}
