//! Ticket storage trait and types.

use thiserror::Error;

use crate::ticket::{Priority, Ticket, TicketStatus};

/// Error type for ticket operations.
#[derive(Debug, Error)]
pub enum TicketError {
    /// Missing or malformed input (blank title, unknown status).
    #[error("Validation failed: {0}")]
    Validation(String),

    /// No ticket with this id.
    #[error("Ticket not found: {0}")]
    NotFound(i64),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

/// Request to create a new ticket.
#[derive(Debug, Clone)]
pub struct CreateTicketRequest {
    /// Short summary (required, trimmed by the store).
    pub title: String,
    /// Optional details.
    pub description: Option<String>,
    /// Resolved priority (explicit or suggested).
    pub priority: Priority,
    /// Initial status.
    pub status: TicketStatus,
}

impl CreateTicketRequest {
    /// Create a request with the default `NEW` status.
    pub fn new(title: impl Into<String>, description: Option<String>, priority: Priority) -> Self {
        Self {
            title: title.into(),
            description,
            priority,
            status: TicketStatus::default(),
        }
    }

    /// Override the initial status.
    pub fn with_status(mut self, status: TicketStatus) -> Self {
        self.status = status;
        self
    }
}

/// Trait for ticket storage backends.
pub trait TicketStore: Send + Sync {
    /// Persist a new ticket, assigning its id and creation time.
    fn create(&self, request: CreateTicketRequest) -> Result<Ticket, TicketError>;

    /// All tickets, newest first.
    fn list(&self) -> Result<Vec<Ticket>, TicketError>;

    /// Get a ticket by ID.
    fn get(&self, id: i64) -> Result<Ticket, TicketError>;

    /// Set a ticket's status. Any status may replace any other.
    fn update_status(&self, id: i64, status: TicketStatus) -> Result<Ticket, TicketError>;

    /// Permanently delete a ticket.
    fn delete(&self, id: i64) -> Result<(), TicketError>;
}
