use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{request::Parts, StatusCode},
    Json,
};
use serde::Serialize;
use serde_json::{Map, Value};

/// Error envelope returned for every failed relay: `{ "error": "<message>" }`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    // ---
    pub error: String,
}

/// Rejection type shared by the deal handlers and the payload extractor.
pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// Builds the `500 Internal Server Error` envelope.
///
/// Every failure class (bad client body, transport error, upstream non-2xx)
/// maps here; callers are not told which one occurred.
pub fn internal_error(message: impl Into<String>) -> ApiError {
    // ---
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

/// Opaque JSON deal payload read from the request body.
///
/// Unlike `axum::Json`, the content type is not checked and an empty body is
/// accepted as `{}`, leaving validation to the upstream. A body that is not
/// valid JSON is rejected with the generic 500 envelope rather than axum's
/// 4xx rejections.
#[derive(Debug)]
pub struct DealPayload(pub Value);

impl<S> FromRequest<S> for DealPayload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        // ---
        let body = Bytes::from_request(req, state).await.map_err(|rejection| {
            tracing::error!("Failed to read request body: {}", rejection.body_text());
            internal_error(rejection.body_text())
        })?;

        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(DealPayload(Value::Object(Map::new())));
        }

        serde_json::from_slice(&body).map(DealPayload).map_err(|err| {
            tracing::error!("Rejected malformed deal payload: {}", err);
            internal_error(err.to_string())
        })
    }
}

/// The `{id}` path parameter of a deal route.
///
/// A parameter axum cannot decode (invalid UTF-8, for instance) is rejected
/// with the generic 500 envelope instead of axum's plain-text 400.
#[derive(Debug)]
pub struct DealId(pub String);

impl<S> FromRequestParts<S> for DealId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // ---
        let Path(id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                tracing::error!("Rejected deal id: {}", rejection.body_text());
                internal_error(rejection.body_text())
            })?;

        Ok(DealId(id))
    }
}
