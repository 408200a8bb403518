use crate::domain::MetricsPtr;
use axum::{extract::State, http::StatusCode, response::IntoResponse};

/// Handler for the `/metrics` endpoint on the metrics listener.
///
/// Returns metrics in Prometheus text format for scraping. The body comes
/// from whichever implementation was configured at startup (Prometheus or
/// no-op) and is never empty.
pub async fn metrics_handler(State(metrics): State<MetricsPtr>) -> impl IntoResponse {
    // ---
    let metrics_text = metrics.render();

    (
        StatusCode::OK,
        [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
        metrics_text,
    )
}
