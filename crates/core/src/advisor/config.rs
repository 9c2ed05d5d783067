//! Advisor configuration types.

use serde::{Deserialize, Serialize};

/// Environment variable consulted when no OpenAI key is configured.
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// LLM provider type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LlmProvider {
    /// OpenAI API or any OpenAI-compatible endpoint.
    #[default]
    OpenAi,
    /// Local Ollama instance.
    Ollama,
}

/// LLM client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// LLM provider.
    #[serde(default)]
    pub provider: LlmProvider,
    /// Model name/identifier.
    #[serde(default = "default_model")]
    pub model: String,
    /// API key. For OpenAI, falls back to `OPENAI_API_KEY`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Custom API base URL (for proxies or self-hosted).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    /// Output token cap for classification answers.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Optional request timeout in seconds. Unset means no client-side timeout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u32>,
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_max_tokens() -> u32 {
    3
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::default(),
            model: default_model(),
            api_key: None,
            api_base: None,
            max_tokens: default_max_tokens(),
            timeout_secs: None,
        }
    }
}

impl LlmConfig {
    /// The configured key, or the provider's environment fallback.
    ///
    /// Blank keys count as absent.
    pub fn resolved_api_key(&self) -> Option<String> {
        let configured = self.api_key.clone().filter(|k| !k.trim().is_empty());
        match self.provider {
            LlmProvider::OpenAi => configured.or_else(|| {
                std::env::var(OPENAI_API_KEY_ENV)
                    .ok()
                    .filter(|k| !k.trim().is_empty())
            }),
            LlmProvider::Ollama => configured,
        }
    }
}

/// Priority advisor configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdvisorConfig {
    /// External model used when a request asks for AI suggestion.
    /// Defaults to OpenAI; without a key the keyword heuristic answers instead.
    #[serde(default)]
    pub llm: LlmConfig,
}
