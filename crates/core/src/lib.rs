pub mod advisor;
pub mod config;
pub mod testing;
pub mod ticket;

pub use advisor::{
    suggest_from_text, AdvisorConfig, ExternalServiceError, LlmClient, LlmConfig, LlmError,
    LlmProvider, PriorityAdvisor, Suggestion, SuggestionSource,
};
pub use config::{
    load_config, load_config_from_env, load_config_from_str, validate_config, Config,
    ConfigError, DatabaseConfig, LogFormat, LoggingConfig, SanitizedConfig, ServerConfig,
};
pub use ticket::{
    CreateTicketRequest, Priority, SqliteTicketStore, Ticket, TicketError, TicketStatus,
    TicketStore,
};
