mod pipedrive_client;

pub use pipedrive_client::PipedriveClient;
use crate::config::UpstreamConfig;
use std::sync::Arc;

/// Creates the Pipedrive-backed deals client.
///
/// Returns a shared pointer ready to be placed in the application state.
pub fn create_pipedrive_client(config: &UpstreamConfig) -> anyhow::Result<crate::domain::DealsApiPtr> {
    tracing::info!(base_url = %config.base_url, "Initializing Pipedrive client");

    Ok(Arc::new(PipedriveClient::new(config)?))
}
