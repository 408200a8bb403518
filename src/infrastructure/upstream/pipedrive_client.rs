//! Pipedrive deals client.
//!
//! Thin `reqwest` wrapper implementing `DealsApi`. Every call appends the
//! configured `api_token` as a query parameter and passes JSON bodies through
//! untouched. Non-2xx responses and transport failures both become errors;
//! nothing is retried.

use crate::config::UpstreamConfig;
use crate::domain::DealsApi;
use anyhow::{anyhow, bail, Context, Result};
use reqwest::{Client, RequestBuilder, Url};
use serde_json::Value;

/// `DealsApi` implementation talking to the Pipedrive REST API.
pub struct PipedriveClient {
    http: Client,
    base_url: Url,
    api_token: String,
}

impl PipedriveClient {
    // ---

    /// Builds a client for the deals collection at `config.base_url`.
    ///
    /// # Errors
    /// Returns an error if `config.base_url` is not an absolute URL that can
    /// take path segments, or if the underlying HTTP client cannot be
    /// constructed.
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        // ---
        let base_url = Url::parse(config.base_url.trim_end_matches('/'))
            .with_context(|| format!("invalid upstream base URL: {}", config.base_url))?;
        if base_url.cannot_be_a_base() {
            bail!("invalid upstream base URL: {}", config.base_url);
        }

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .context("failed to build upstream HTTP client")?;

        Ok(Self {
            http,
            base_url,
            api_token: config.api_token.clone(),
        })
    }

    /// `<base-url>/<id>`, with `id` percent-encoded as a single path segment.
    fn deal_url(&self, id: &str) -> Result<Url> {
        // ---
        if matches!(id, "" | "." | "..") {
            bail!("Invalid deal id: {id:?}");
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("upstream base URL cannot take a deal id"))?
            .pop_if_empty()
            .push(id);

        Ok(url)
    }

    /// Sends `request` with the API token attached and decodes the JSON reply.
    ///
    /// URLs are stripped from transport errors since they carry the token.
    async fn send(&self, request: RequestBuilder) -> Result<Value> {
        // ---
        let response = request
            .query(&[("api_token", self.api_token.as_str())])
            .send()
            .await
            .map_err(|err| err.without_url())?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), body = %body, "Upstream rejected request");
            bail!("Request failed with status code {}", status.as_u16());
        }

        let data = response
            .json::<Value>()
            .await
            .map_err(|err| err.without_url())?;

        Ok(data)
    }
}

#[async_trait::async_trait]
impl DealsApi for PipedriveClient {
    // ---
    async fn list_deals(&self) -> Result<Value> {
        self.send(self.http.get(self.base_url.clone())).await
    }

    async fn create_deal(&self, payload: Value) -> Result<Value> {
        self.send(self.http.post(self.base_url.clone()).json(&payload))
            .await
    }

    async fn update_deal(&self, id: &str, payload: Value) -> Result<Value> {
        let url = self.deal_url(id)?;
        self.send(self.http.put(url).json(&payload)).await
    }
}
