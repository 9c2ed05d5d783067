//! Ticket domain types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::TicketError;

/// Severity classification of a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// All priorities, lowest first.
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    /// Wire name (e.g. "HIGH").
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "LOW",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = TicketError;

    /// Exact, case-sensitive match on the wire name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LOW" => Ok(Priority::Low),
            "MEDIUM" => Ok(Priority::Medium),
            "HIGH" => Ok(Priority::High),
            other => Err(TicketError::Validation(format!(
                "invalid priority: {} (expected LOW, MEDIUM or HIGH)",
                other
            ))),
        }
    }
}

/// Workflow state of a ticket.
///
/// There is no transition graph: any status may be set from any other,
/// so closed tickets can be reopened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    #[default]
    New,
    InProgress,
    Closed,
}

impl TicketStatus {
    pub const ALL: [TicketStatus; 3] = [
        TicketStatus::New,
        TicketStatus::InProgress,
        TicketStatus::Closed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::New => "NEW",
            TicketStatus::InProgress => "IN_PROGRESS",
            TicketStatus::Closed => "CLOSED",
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketStatus {
    type Err = TicketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NEW" => Ok(TicketStatus::New),
            "IN_PROGRESS" => Ok(TicketStatus::InProgress),
            "CLOSED" => Ok(TicketStatus::Closed),
            other => Err(TicketError::Validation(format!(
                "invalid status: {} (expected NEW, IN_PROGRESS or CLOSED)",
                other
            ))),
        }
    }
}

/// A support ticket as persisted by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    /// Store-assigned identifier.
    pub id: i64,
    /// Short summary, never blank.
    pub title: String,
    /// Optional free-form details.
    pub description: Option<String>,
    /// Fixed at creation.
    pub priority: Priority,
    /// The only mutable field.
    pub status: TicketStatus,
    /// Creation time, used for newest-first listing.
    pub created_at: DateTime<Utc>,
}
