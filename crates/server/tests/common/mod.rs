//! Common test utilities for in-process API testing.
//!
//! This module provides a test fixture that builds the router with an
//! on-disk SQLite store in a temp dir and an optional mock LLM client, so
//! tests run without a model endpoint.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use ticketdesk_core::{
    testing::MockLlmClient, Config, DatabaseConfig, LlmClient, PriorityAdvisor,
    SqliteTicketStore, TicketStore,
};

/// Test fixture for API testing.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_ticket_creation() {
///     let fixture = TestFixture::new();
///
///     let response = fixture.post("/api/tickets", json!({ "title": "Printer jam" })).await;
///
///     assert_eq!(response.status, 201);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Direct handle on the store backing the router
    pub store: Arc<SqliteTicketStore>,
    /// Mock model client, when the advisor was given one
    pub llm: Option<Arc<MockLlmClient>>,
    /// Temporary directory for the test database
    pub temp_dir: TempDir,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestFixture {
    /// Fixture whose advisor has no model configured.
    pub fn new() -> Self {
        Self::build(None)
    }

    /// Fixture whose advisor delegates to `client`.
    pub fn with_llm(client: MockLlmClient) -> Self {
        Self::build(Some(Arc::new(client)))
    }

    fn build(llm: Option<Arc<MockLlmClient>>) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");

        let config = Config {
            database: DatabaseConfig {
                path: db_path.clone(),
            },
            ..Default::default()
        };

        let store = Arc::new(SqliteTicketStore::new(&db_path).expect("Failed to create ticket store"));

        let advisor = match &llm {
            Some(client) => PriorityAdvisor::with_client(Arc::clone(client) as Arc<dyn LlmClient>, 3),
            None => PriorityAdvisor::heuristic_only(),
        };

        let state = Arc::new(ticketdesk_server::state::AppState::new(
            config,
            Arc::clone(&store) as Arc<dyn TicketStore>,
            advisor,
        ));

        let router = ticketdesk_server::api::create_router(state);

        Self {
            router,
            store,
            llm,
            temp_dir,
        }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    /// Send a PUT request with JSON body.
    pub async fn put(&self, path: &str, body: Value) -> TestResponse {
        self.request("PUT", path, Some(body)).await
    }

    /// Send a DELETE request.
    pub async fn delete(&self, path: &str) -> TestResponse {
        self.request("DELETE", path, None).await
    }

    /// Send a POST request with raw string body (for testing malformed JSON).
    pub async fn post_raw(&self, path: &str, body: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Create a ticket and return its JSON.
    pub async fn create_ticket(&self, body: Value) -> Value {
        let response = self.post("/api/tickets", body).await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "create failed: {}",
            response.body
        );
        response.body
    }

    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        self.send(request_builder.body(body).unwrap()).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body_bytes).into_owned()))
        };

        TestResponse { status, body }
    }
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status,
            $response.status,
            serde_json::to_string_pretty(&$response.body).unwrap_or_default()
        );
    };
}
