use anyhow::Result;
use serde_json::Value;
use std::sync::Arc;

/// Abstraction over the upstream CRM that owns deal data.
///
/// Payloads are opaque JSON and are passed through untouched. Any failure
/// (transport, timeout, non-2xx) is reported as an error whose message is
/// surfaced to the caller.
#[async_trait::async_trait]
pub trait DealsApi: Send + Sync {
    // ---
    /// List deals.
    async fn list_deals(&self) -> Result<Value>;

    /// Create a deal from the given payload.
    async fn create_deal(&self, payload: Value) -> Result<Value>;

    /// Update the deal identified by `id` with the given payload.
    async fn update_deal(&self, id: &str, payload: Value) -> Result<Value>;
}

/// Type alias for any backend that implements DealsApi.
pub type DealsApiPtr = Arc<dyn DealsApi>;
