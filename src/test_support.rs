//! Shared helpers for router-level unit tests.

use crate::app_state::AppState;
use crate::domain::{DealsApi, DealsApiPtr, MetricsPtr};
use crate::infrastructure::create_noop_metrics;
use anyhow::Result;
use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// Upstream call observed by [`MockDeals`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List,
    Create(Value),
    Update(String, Value),
}

/// In-memory `DealsApi` returning a canned result and recording every call.
pub struct MockDeals {
    result: std::result::Result<Value, String>,
    calls: Mutex<Vec<Call>>,
}

impl MockDeals {
    // ---
    pub fn succeeding(data: Value) -> Arc<Self> {
        Arc::new(Self {
            result: Ok(data),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            result: Err(message.to_string()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Application router backed by this mock and no-op metrics.
    pub fn router(self: &Arc<Self>) -> Router {
        self.router_with_metrics(create_noop_metrics().unwrap())
    }

    pub fn router_with_metrics(self: &Arc<Self>, metrics: MetricsPtr) -> Router {
        let deals: DealsApiPtr = self.clone();
        crate::app_router(AppState::new(deals, metrics))
    }

    fn respond(&self, call: Call) -> Result<Value> {
        self.calls.lock().unwrap().push(call);
        self.result.clone().map_err(anyhow::Error::msg)
    }
}

#[async_trait::async_trait]
impl DealsApi for MockDeals {
    async fn list_deals(&self) -> Result<Value> {
        self.respond(Call::List)
    }

    async fn create_deal(&self, payload: Value) -> Result<Value> {
        self.respond(Call::Create(payload))
    }

    async fn update_deal(&self, id: &str, payload: Value) -> Result<Value> {
        self.respond(Call::Update(id.to_string(), payload))
    }
}

/// Decoded response of a single router call.
pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: String,
    pub body: Value,
}

pub async fn send(router: Router, method: &str, uri: &str, body: Option<String>) -> TestResponse {
    // ---
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .body(body.map(Body::from).unwrap_or_else(Body::empty))
        .unwrap();

    send_request(router, req).await
}

pub async fn send_request(router: Router, req: Request<Body>) -> TestResponse {
    // ---
    let response = router.oneshot(req).await.unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    TestResponse {
        status,
        content_type,
        body,
    }
}
