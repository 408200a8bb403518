//! Application state management.
//!
//! This module defines the shared state passed to the application handlers
//! via the `State` extractor: the upstream deals client and the metrics
//! implementation. Both are held behind `Arc`, so cloning the state per
//! request is cheap.

use crate::domain::{DealsApiPtr, MetricsPtr};

/// Shared application state passed to all Axum handlers.
///
/// Built once at startup and never mutated afterwards.
///
/// # Fields
///
/// - `deals`: Upstream CRM client (Pipedrive in production, mocks in tests)
/// - `metrics`: Metrics implementation (Prometheus or no-op), shared with the
///   metrics router so recording and scraping see the same registry
#[derive(Clone)]
pub(crate) struct AppState {
    /// Upstream deals API every deal route relays to.
    deals: DealsApiPtr,

    /// Metrics implementation for recording request samples.
    metrics: MetricsPtr,
}

impl AppState {
    // ---

    pub fn new(deals: DealsApiPtr, metrics: MetricsPtr) -> Self {
        // ---
        AppState { deals, metrics }
    }

    /// Get a reference to the upstream deals API.
    pub(crate) fn deals(&self) -> &DealsApiPtr {
        // ---
        &self.deals
    }

    /// Get a reference to the metrics implementation.
    pub(crate) fn metrics(&self) -> &MetricsPtr {
        // ---
        &self.metrics
    }
}
