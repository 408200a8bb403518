// Gateway module - controls public API for handlers
// Modules are private, only exported symbols are public

mod deals;
mod health;
mod metrics;
mod root;
mod shared_types;

// Core handlers
pub use health::health_check;
pub use metrics::metrics_handler;
pub use root::root_handler;

// Deal relay handlers
pub use deals::{create_deal, list_deals, update_deal};
