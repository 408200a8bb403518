use axum::response::IntoResponse;

pub async fn root_handler() -> impl IntoResponse {
    let version = env!("CARGO_PKG_VERSION");
    format!(
        r#"Deals Gateway
Version: {version}

Available endpoints:
  - GET  /deals       - List deals from Pipedrive
  - POST /deals       - Create a deal (JSON body forwarded as-is)
  - PUT  /deals/{{id}}  - Update a deal (JSON body forwarded as-is)
  - GET  /health      - Liveness check

Prometheus metrics are served on the separate metrics listener at GET /metrics.
"#
    )
}
