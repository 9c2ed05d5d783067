//! Priority suggestion with delegated inference and heuristic fallback.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info, warn};

use super::config::{LlmConfig, LlmProvider};
use super::heuristic::suggest_from_text;
use super::llm::{CompletionRequest, LlmClient, LlmError, OllamaClient, OpenAiClient};
use crate::ticket::Priority;

/// Why the delegated strategy could not produce a priority.
///
/// Never returned to callers of [`PriorityAdvisor`]; every variant ends in
/// the keyword heuristic.
#[derive(Debug, Error)]
pub enum ExternalServiceError {
    #[error("No LLM client configured")]
    NotConfigured,

    #[error("LLM request failed: {0}")]
    Llm(#[from] LlmError),

    #[error("Unexpected LLM answer: {0:?}")]
    UnexpectedResponse(String),
}

/// Which strategy produced a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionSource {
    Heuristic,
    Model,
    Fallback,
}

impl SuggestionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionSource::Heuristic => "heuristic",
            SuggestionSource::Model => "model",
            SuggestionSource::Fallback => "fallback",
        }
    }
}

/// A priority together with the strategy that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Suggestion {
    pub priority: Priority,
    pub source: SuggestionSource,
}

/// Build the classification prompt sent to the external model.
pub fn build_prompt(title: &str, description: Option<&str>) -> String {
    format!(
        "You are a helpful assistant that MUST respond with exactly one of these words: \
         LOW, MEDIUM, or HIGH. \
         Classify the priority of the following support ticket (no explanation, only the word):\n\n\
         Title: {}\n\nDescription: {}\n\nRespond with exactly one word:",
        title,
        description.unwrap_or_default()
    )
}

/// Accept a model answer that is exactly one priority word, or starts with one.
pub fn parse_model_answer(text: &str) -> Option<Priority> {
    let normalized = text.trim().to_uppercase();
    if let Ok(priority) = normalized.parse::<Priority>() {
        return Some(priority);
    }
    normalized
        .split_whitespace()
        .next()
        .and_then(|token| token.parse::<Priority>().ok())
}

/// Suggests ticket priorities.
///
/// Holds an optional LLM client; without one the delegated strategy always
/// falls back to the keyword heuristic.
#[derive(Clone)]
pub struct PriorityAdvisor {
    client: Option<Arc<dyn LlmClient>>,
    max_tokens: u32,
}

impl PriorityAdvisor {
    /// Advisor with no external model.
    pub fn heuristic_only() -> Self {
        Self {
            client: None,
            max_tokens: 3,
        }
    }

    /// Advisor backed by the given client.
    pub fn with_client(client: Arc<dyn LlmClient>, max_tokens: u32) -> Self {
        Self {
            client: Some(client),
            max_tokens,
        }
    }

    /// Build an advisor from configuration.
    ///
    /// A missing API key is not an error: the advisor is created without a
    /// client and answers from the heuristic.
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        let timeout = config.timeout_secs.map(|s| Duration::from_secs(u64::from(s)));

        let client: Option<Arc<dyn LlmClient>> = match config.provider {
            LlmProvider::OpenAi => match config.resolved_api_key() {
                Some(api_key) => {
                    let mut client = OpenAiClient::new(api_key, config.model.clone());
                    if let Some(ref api_base) = config.api_base {
                        client = client.with_api_base(api_base.clone());
                    }
                    if let Some(timeout) = timeout {
                        client = client.with_timeout(timeout)?;
                    }
                    info!("LLM priority suggestions enabled with OpenAI ({})", config.model);
                    Some(Arc::new(client))
                }
                None => {
                    info!("No OpenAI API key configured, AI suggestions use the keyword heuristic");
                    None
                }
            },
            LlmProvider::Ollama => {
                let mut client = OllamaClient::new(config.model.clone());
                if let Some(ref api_base) = config.api_base {
                    client = client.with_api_base(api_base.clone());
                }
                if let Some(timeout) = timeout {
                    client = client.with_timeout(timeout)?;
                }
                info!("LLM priority suggestions enabled with Ollama ({})", config.model);
                Some(Arc::new(client))
            }
        };

        Ok(Self {
            client,
            max_tokens: config.max_tokens,
        })
    }

    /// Whether an external model is configured.
    pub fn has_model(&self) -> bool {
        self.client.is_some()
    }

    /// Pick a strategy per request: delegated when `use_ai`, heuristic otherwise.
    pub async fn suggest(&self, title: &str, description: Option<&str>, use_ai: bool) -> Suggestion {
        if !use_ai {
            return Suggestion {
                priority: suggest_from_text(title, description),
                source: SuggestionSource::Heuristic,
            };
        }

        match self.ask_model(title, description).await {
            Ok(priority) => Suggestion {
                priority,
                source: SuggestionSource::Model,
            },
            Err(e) => {
                warn!("LLM priority suggestion failed, falling back to heuristic: {}", e);
                Suggestion {
                    priority: suggest_from_text(title, description),
                    source: SuggestionSource::Fallback,
                }
            }
        }
    }

    /// Delegated strategy. Always yields a priority.
    pub async fn suggest_with_external_model(
        &self,
        title: &str,
        description: Option<&str>,
    ) -> Priority {
        self.ask_model(title, description)
            .await
            .unwrap_or_else(|e| {
                warn!("LLM priority suggestion failed, falling back to heuristic: {}", e);
                suggest_from_text(title, description)
            })
    }

    /// One attempt at the external model, no retries.
    async fn ask_model(
        &self,
        title: &str,
        description: Option<&str>,
    ) -> Result<Priority, ExternalServiceError> {
        let client = self
            .client
            .as_ref()
            .ok_or(ExternalServiceError::NotConfigured)?;

        let request = CompletionRequest::new(build_prompt(title, description))
            .with_max_tokens(self.max_tokens)
            .with_temperature(0.0);

        let response = client.complete(request).await?;
        debug!(
            provider = client.provider(),
            model = %response.model,
            output_tokens = response.usage.output_tokens,
            "LLM answered {:?}",
            response.text
        );

        parse_model_answer(&response.text)
            .ok_or(ExternalServiceError::UnexpectedResponse(response.text))
    }
}

impl std::fmt::Debug for PriorityAdvisor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriorityAdvisor")
            .field("provider", &self.client.as_ref().map(|c| c.provider().to_string()))
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}
