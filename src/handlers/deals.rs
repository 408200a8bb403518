//! Deal relay handlers.
//!
//! Each handler forwards the request to the upstream deals API and relays
//! its JSON body with `200 OK`. Any failure is logged with the route and
//! collapsed into `500` with `{ "error": "<message>" }`. Nothing is retried.

use crate::app_state::AppState;
use crate::handlers::shared_types::{internal_error, ApiError, DealId, DealPayload};
use axum::{extract::State, Json};
use serde_json::Value;

/// Logs an upstream failure and turns it into the error envelope.
fn relay_failure(route: &'static str, err: anyhow::Error) -> ApiError {
    // ---
    let message = format!("{err:#}");
    tracing::error!(route, error = %message, "Upstream request failed");
    internal_error(message)
}

/// GET /deals
///
/// Lists deals from the upstream and returns its body verbatim.
#[tracing::instrument(skip(state))]
pub async fn list_deals(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    // ---
    let data = state
        .deals()
        .list_deals()
        .await
        .map_err(|err| relay_failure("GET /deals", err))?;

    Ok(Json(data))
}

/// POST /deals
///
/// Forwards the client body unchanged and returns the full upstream body.
/// An empty body is forwarded as `{}`; the upstream decides whether it is
/// acceptable.
///
/// # Request Body
/// ```json
/// { "title": "Test Deal", "value": 1000, "currency": "USD" }
/// ```
#[tracing::instrument(skip(state, payload))]
pub async fn create_deal(
    State(state): State<AppState>,
    DealPayload(payload): DealPayload,
) -> Result<Json<Value>, ApiError> {
    // ---
    let data = state
        .deals()
        .create_deal(payload)
        .await
        .map_err(|err| relay_failure("POST /deals", err))?;

    Ok(Json(data))
}

/// PUT /deals/{id}
///
/// Forwards the client body to the upstream deal identified by `id`.
#[tracing::instrument(skip(state, payload))]
pub async fn update_deal(
    State(state): State<AppState>,
    DealId(id): DealId,
    DealPayload(payload): DealPayload,
) -> Result<Json<Value>, ApiError> {
    // ---
    let data = state
        .deals()
        .update_deal(&id, payload)
        .await
        .map_err(|err| relay_failure("PUT /deals/{id}", err))?;

    Ok(Json(data))
}
