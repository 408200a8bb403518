// src/config.rs

//! Application configuration loaded from environment variables.
//!
//! This module defines all startup-time configuration for the gateway.
//! Configuration is read once, validated eagerly, and failures are treated
//! as deployment errors rather than recoverable runtime conditions.

use anyhow::Result;
use std::time::Duration;

// ============================================================
// Local macros (config-only, intentionally explicit)
// ============================================================

/// Reads a required environment variable.
///
/// # Behavior
/// - Fails fast if the variable is missing
/// - Produces a clear, human-readable error message
/// - Intended for startup-time configuration validation
macro_rules! required_env {
    // ---
    ($key:literal) => {
        std::env::var($key)
            .map_err(|_| anyhow::anyhow!(concat!("Missing required configuration: ", $key)))?
    };
}

/// Reads an optional environment variable and attempts to parse it.
///
/// If the variable is missing or cannot be parsed, the provided
/// default value is used.
macro_rules! optional_env_parse {
    // ---
    ($key:literal, $ty:ty, $default:expr) => {
        std::env::var($key)
            .ok()
            .and_then(|v| v.parse::<$ty>().ok())
            .unwrap_or($default)
    };
}

#[cfg(test)]
/// Asserts that a configuration constructor fails due to a missing
/// required environment variable.
macro_rules! assert_missing_config {
    // ---
    ($expr:expr, $key:literal) => {{
        let err = $expr.expect_err("expected configuration error");
        assert!(
            err.to_string()
                .contains(concat!("Missing required configuration: ", $key)),
            "unexpected error: {err}"
        );
    }};
}

// ============================================================
// Public configuration facade
// ============================================================

/// Aggregated application configuration.
///
/// This is the single source of truth for startup configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub upstream: upstream::UpstreamConfig,
    pub server: server::ServerConfig,
    pub metrics: metrics::MetricsConfig,
}

impl AppConfig {
    /// Loads and validates all application configuration from the environment.
    ///
    /// # Errors
    /// Returns an error if any required configuration is missing.
    /// This function is intended to be called exactly once at startup.
    pub fn from_env() -> Result<Self> {
        // ---
        Ok(Self {
            upstream: upstream::UpstreamConfig::from_env()?,
            server: server::ServerConfig::from_env(),
            metrics: metrics::MetricsConfig::from_env(),
        })
    }
}

// ============================================================
// Upstream (Pipedrive) configuration
// ============================================================

mod upstream {
    // ---
    use super::*;

    /// Default deals collection of the Pipedrive v1 API.
    pub const DEFAULT_BASE_URL: &str = "https://api.pipedrive.com/v1/deals";

    /// Where deal requests are relayed to, and with which credential.
    #[derive(Clone)]
    pub struct UpstreamConfig {
        /// Deals collection URL; `PUT` requests append `/{id}`.
        pub base_url: String,

        /// Static API token sent as the `api_token` query parameter.
        pub api_token: String,

        /// Per-request timeout. `None` keeps the HTTP client default (no timeout).
        pub timeout: Option<Duration>,
    }

    impl UpstreamConfig {
        /// Builds an [`UpstreamConfig`] from environment variables.
        ///
        /// # Errors
        /// Returns an error if `API_TOKEN` is missing.
        pub fn from_env() -> Result<Self> {
            // ---
            let api_token = required_env!("API_TOKEN");
            let base_url = std::env::var("PIPEDRIVE_API_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
            let timeout_secs = optional_env_parse!("UPSTREAM_TIMEOUT_SEC", u64, 0);

            Ok(Self {
                base_url,
                api_token,
                timeout: (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs)),
            })
        }
    }

    // Keeps the token out of logs.
    impl std::fmt::Debug for UpstreamConfig {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("UpstreamConfig")
                .field("base_url", &self.base_url)
                .field("api_token", &"<redacted>")
                .field("timeout", &self.timeout)
                .finish()
        }
    }
}
pub use upstream::UpstreamConfig;

// ============================================================
// Listener configuration
// ============================================================

mod server {
    // ---

    /// Listen addresses for the application and metrics servers.
    #[derive(Debug, Clone)]
    pub struct ServerConfig {
        /// Host both listeners bind to. Defaults to `0.0.0.0`.
        pub bind_host: String,

        /// Application server port. Defaults to 3000.
        pub port: u16,

        /// Metrics server port. Defaults to 9100.
        pub metrics_port: u16,
    }

    impl ServerConfig {
        pub fn from_env() -> Self {
            // ---
            let bind_host =
                std::env::var("BIND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
            let port = optional_env_parse!("PORT", u16, 3000);
            let metrics_port = optional_env_parse!("METRICS_PORT", u16, 9100);

            Self {
                bind_host,
                port,
                metrics_port,
            }
        }

        pub fn app_addr(&self) -> String {
            format!("{}:{}", self.bind_host, self.port)
        }

        pub fn metrics_addr(&self) -> String {
            format!("{}:{}", self.bind_host, self.metrics_port)
        }
    }
}
pub use server::ServerConfig;

// ============================================================
// Metrics configuration
// ============================================================

mod metrics {
    // ---

    /// Which metrics implementation backs the `/metrics` endpoint.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum MetricsBackend {
        Prometheus,
        Noop,
    }

    #[derive(Debug, Clone)]
    pub struct MetricsConfig {
        /// `METRICS_TYPE`: `noop` disables collection, anything else is Prometheus.
        pub backend: MetricsBackend,

        /// Value of the constant `app` label on every series.
        pub app_label: String,
    }

    impl MetricsConfig {
        pub fn from_env() -> Self {
            // ---
            let backend = match std::env::var("METRICS_TYPE").as_deref() {
                Ok("noop") => MetricsBackend::Noop,
                _ => MetricsBackend::Prometheus,
            };
            let app_label = std::env::var("METRICS_APP_LABEL")
                .unwrap_or_else(|_| "deals-gateway".to_string());

            Self { backend, app_label }
        }
    }
}
pub use metrics::{MetricsBackend, MetricsConfig};

// ============================================================
// Tests
// ============================================================
