mod deals;
mod metrics;

// Publicly expose the upstream deals abstraction
pub use deals::{DealsApi, DealsApiPtr};

// Publicly expose the Metrics abstraction
pub use metrics::{Metrics, MetricsPtr};
