// Test helpers are intentionally partially used
#![allow(dead_code)]

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use deals_gateway::create_routers;
use reqwest::Client;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::time::sleep;

pub const TEST_TOKEN: &str = "test-api-token";

// ============================================================================
// Fake Pipedrive upstream
// ============================================================================

async fn list_deals(Query(query): Query<HashMap<String, String>>) -> Json<Value> {
    // ---
    Json(json!({
        "success": true,
        "data": [{ "id": 1, "title": "Existing Deal" }],
        "api_token": query.get("api_token"),
    }))
}

/// Mimics Pipedrive rejecting deals without a title.
async fn add_deal(Json(deal): Json<Value>) -> (StatusCode, Json<Value>) {
    // ---
    if deal.get("title").is_none() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "success": false, "error": "Deal title required" })),
        );
    }
    (StatusCode::CREATED, Json(json!({ "success": true, "data": deal })))
}

async fn update_deal(Path(id): Path<String>, Json(deal): Json<Value>) -> (StatusCode, Json<Value>) {
    // ---
    match id.as_str() {
        "404" => (
            StatusCode::NOT_FOUND,
            Json(json!({ "success": false, "error": "Deal not found" })),
        ),
        "slow" => {
            sleep(Duration::from_secs(3)).await;
            (StatusCode::OK, Json(json!({ "success": true })))
        }
        _ => (
            StatusCode::OK,
            Json(json!({ "success": true, "id": id, "data": deal })),
        ),
    }
}

/// Serves a fake deals API on an ephemeral port; returns its deals URL.
pub async fn spawn_fake_upstream() -> String {
    // ---
    let router = Router::new()
        .route("/v1/deals", get(list_deals).post(add_deal))
        .route("/v1/deals/{id}", put(update_deal));
    let addr = spawn(router).await;
    format!("http://{addr}/v1/deals")
}

/// Returns a deals URL nothing is listening on.
pub async fn unreachable_upstream() -> String {
    // ---
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/v1/deals")
}

async fn spawn(router: Router) -> SocketAddr {
    // ---
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    // Spawn the server in the background
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    addr
}

// ============================================================================
// Gateway under test
// ============================================================================

pub struct TestServer {
    pub app_addr: SocketAddr,
    pub metrics_addr: SocketAddr,
    pub client: Client,
}

impl TestServer {
    // ---

    /// Gateway relaying to a freshly spawned fake upstream.
    pub async fn new() -> Self {
        // ---
        let upstream = spawn_fake_upstream().await;
        Self::with_upstream(&upstream).await
    }

    /// Gateway relaying to `upstream_url`, configured through the environment
    /// exactly as in production.
    pub async fn with_upstream(upstream_url: &str) -> Self {
        // ---
        std::env::set_var("API_TOKEN", TEST_TOKEN);
        std::env::set_var("PIPEDRIVE_API_URL", upstream_url);
        if std::env::var("METRICS_TYPE").is_err() {
            std::env::set_var("METRICS_TYPE", "prom");
        }

        let routers = create_routers().expect("Should be able to create routers");
        let app_addr = spawn(routers.app).await;
        let metrics_addr = spawn(routers.metrics).await;

        // Give the servers a moment to start
        sleep(Duration::from_millis(100)).await;

        Self {
            app_addr,
            metrics_addr,
            client: Client::new(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        // ---
        format!("http://{}{}", self.app_addr, path)
    }

    pub fn metrics_url(&self) -> String {
        // ---
        format!("http://{}/metrics", self.metrics_addr)
    }

    pub async fn scrape(&self) -> String {
        // ---
        self.client
            .get(self.metrics_url())
            .send()
            .await
            .expect("Failed to scrape metrics")
            .text()
            .await
            .expect("Failed to read metrics body")
    }
}

/// Value of the first sample of `name` carrying every label in `labels`.
pub fn sample_value(body: &str, name: &str, labels: &[(&str, &str)]) -> Option<f64> {
    // ---
    body.lines()
        .filter(|line| line.starts_with(&format!("{name}{{")))
        .find(|line| {
            labels
                .iter()
                .all(|(key, value)| line.contains(&format!("{key}=\"{value}\"")))
        })
        .and_then(|line| line.rsplit(' ').next())
        .and_then(|value| value.parse().ok())
}
