use std::sync::Arc;
use ticketdesk_core::{Config, PriorityAdvisor, SanitizedConfig, TicketStore};

/// Shared application state
///
/// Built once at startup and handed to the router; tests build their own
/// with an in-memory store and a mock advisor client.
pub struct AppState {
    config: Config,
    ticket_store: Arc<dyn TicketStore>,
    advisor: PriorityAdvisor,
}

impl AppState {
    pub fn new(config: Config, ticket_store: Arc<dyn TicketStore>, advisor: PriorityAdvisor) -> Self {
        Self {
            config,
            ticket_store,
            advisor,
        }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn ticket_store(&self) -> &dyn TicketStore {
        self.ticket_store.as_ref()
    }

    pub fn advisor(&self) -> &PriorityAdvisor {
        &self.advisor
    }
}
