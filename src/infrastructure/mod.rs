pub mod metrics;
mod upstream;

// Re-export the factory functions for easy access
pub use metrics::{create_noop_metrics, create_prom_metrics, PrometheusMetrics};
pub use upstream::{create_pipedrive_client, PipedriveClient};
