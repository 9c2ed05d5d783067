//! Mock LLM client for testing.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::advisor::{CompletionRequest, CompletionResponse, LlmClient, LlmError, LlmUsage};

/// Mock implementation of the LlmClient trait.
///
/// Provides controllable behavior for testing:
/// - Return a fixed answer, or a queue of answers
/// - Track requests for assertions
/// - Simulate failures
///
/// # Example
///
/// ```rust,ignore
/// use ticketdesk_core::testing::MockLlmClient;
///
/// let client = Arc::new(MockLlmClient::with_response("HIGH"));
/// let advisor = PriorityAdvisor::with_client(client.clone(), 3);
///
/// let priority = advisor.suggest_with_external_model("Server down", None).await;
/// assert_eq!(client.request_count().await, 1);
/// ```
pub struct MockLlmClient {
    /// Answer returned when the queue is empty.
    response: Arc<RwLock<String>>,
    /// One-shot answers consumed before `response`.
    queued: Arc<RwLock<VecDeque<String>>>,
    /// If set, the next completion will fail with this error.
    next_error: Arc<RwLock<Option<LlmError>>>,
    /// Recorded requests.
    requests: Arc<RwLock<Vec<CompletionRequest>>>,
}

impl Default for MockLlmClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockLlmClient {
    /// Create a mock answering "MEDIUM".
    pub fn new() -> Self {
        Self::with_response("MEDIUM")
    }

    /// Create a mock that always answers `text`.
    pub fn with_response(text: impl Into<String>) -> Self {
        Self {
            response: Arc::new(RwLock::new(text.into())),
            queued: Arc::new(RwLock::new(VecDeque::new())),
            next_error: Arc::new(RwLock::new(None)),
            requests: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Change the default answer.
    pub async fn set_response(&self, text: impl Into<String>) {
        *self.response.write().await = text.into();
    }

    /// Queue a one-shot answer.
    pub async fn queue_response(&self, text: impl Into<String>) {
        self.queued.write().await.push_back(text.into());
    }

    /// Configure the next completion to fail with the given error.
    pub async fn set_next_error(&self, error: LlmError) {
        *self.next_error.write().await = Some(error);
    }

    /// Get recorded requests.
    pub async fn recorded_requests(&self) -> Vec<CompletionRequest> {
        self.requests.read().await.clone()
    }

    /// Number of completions attempted.
    pub async fn request_count(&self) -> usize {
        self.requests.read().await.len()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    fn provider(&self) -> &str {
        "mock"
    }

    fn model(&self) -> &str {
        "mock-model"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.requests.write().await.push(request);

        if let Some(error) = self.next_error.write().await.take() {
            return Err(error);
        }

        let text = match self.queued.write().await.pop_front() {
            Some(text) => text,
            None => self.response.read().await.clone(),
        };

        Ok(CompletionResponse {
            text,
            usage: LlmUsage {
                input_tokens: 0,
                output_tokens: 1,
            },
            model: "mock-model".to_string(),
        })
    }
}
