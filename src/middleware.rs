//! Request metrics middleware.
//!
//! Installed as a route layer on the application router, so only requests
//! that matched a route reach it. `MatchedPath` is therefore always present
//! and the `path` label is a route template (`/deals/{id}`), never a raw URI.

use crate::domain::MetricsPtr;
use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};
use std::time::Instant;

/// Times the inner handler and records one sample for its response,
/// whatever the status.
pub async fn track_metrics(
    State(metrics): State<MetricsPtr>,
    matched_path: MatchedPath,
    req: Request,
    next: Next,
) -> Response {
    // ---
    let start = Instant::now();
    let method = req.method().clone();

    let response = next.run(req).await;

    metrics.record_http_request(
        start,
        matched_path.as_str(),
        method.as_str(),
        response.status().as_u16(),
    );
    response
}
