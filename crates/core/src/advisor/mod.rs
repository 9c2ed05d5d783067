//! Priority Advisor - suggests LOW/MEDIUM/HIGH for new tickets.
//!
//! Two strategies:
//!
//! - **Heuristic**: keyword matching over title and description, no
//!   dependencies. See [`suggest_from_text`].
//! - **Delegated**: asks an external LLM for a one-word answer. Any failure
//!   (no key, transport error, unusable answer) is logged and replaced by the
//!   heuristic result, so callers always get a priority.

mod config;
mod heuristic;
mod llm;
mod priority_advisor;

pub use config::{AdvisorConfig, LlmConfig, LlmProvider, OPENAI_API_KEY_ENV};
pub use heuristic::{suggest_from_text, HIGH_KEYWORDS, MEDIUM_KEYWORDS};
pub use llm::{
    CompletionRequest, CompletionResponse, LlmClient, LlmError, LlmUsage, OllamaClient,
    OpenAiClient,
};
pub use priority_advisor::{
    build_prompt, parse_model_answer, ExternalServiceError, PriorityAdvisor, Suggestion,
    SuggestionSource,
};
