//! Ticket API handlers.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use ticketdesk_core::{CreateTicketRequest, Priority, Ticket, TicketError, TicketStatus};
use tracing::{error, info};

use crate::metrics::{
    PRIORITY_SUGGESTIONS_TOTAL, TICKETS_CREATED_TOTAL, TICKETS_DELETED_TOTAL,
    TICKET_STATUS_UPDATES,
};
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for creating a ticket
#[derive(Debug, Deserialize)]
pub struct CreateTicketBody {
    /// Short summary (required)
    pub title: Option<String>,
    /// Free-form details
    pub description: Option<String>,
    /// Explicit priority; skips the advisor when present and non-empty
    pub priority: Option<String>,
    /// Ask the external model instead of the keyword heuristic; null means no
    pub use_ai: Option<bool>,
}

/// Request body for updating a ticket's status
#[derive(Debug, Deserialize)]
pub struct UpdateStatusBody {
    pub status: Option<String>,
}

/// Response for ticket operations
#[derive(Debug, Serialize)]
pub struct TicketResponse {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub status: TicketStatus,
    pub created_at: String,
}

impl From<Ticket> for TicketResponse {
    fn from(ticket: Ticket) -> Self {
        Self {
            id: ticket.id,
            title: ticket.title,
            description: ticket.description,
            priority: ticket.priority,
            status: ticket.status,
            created_at: ticket.created_at.to_rfc3339(),
        }
    }
}

/// Error response
#[derive(Debug, Serialize)]
pub struct TicketErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<TicketErrorResponse>);

fn bad_request(message: impl Into<String>) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(TicketErrorResponse {
            error: message.into(),
        }),
    )
}

fn error_response(e: TicketError) -> ApiError {
    let status = match &e {
        TicketError::Validation(_) => StatusCode::BAD_REQUEST,
        TicketError::NotFound(_) => StatusCode::NOT_FOUND,
        TicketError::Database(msg) => {
            error!("Ticket store failure: {}", msg);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (
        status,
        Json(TicketErrorResponse {
            error: e.to_string(),
        }),
    )
}

// ============================================================================
// Handlers
// ============================================================================

/// Create a new ticket
pub async fn create_ticket(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateTicketBody>, JsonRejection>,
) -> Result<(StatusCode, Json<TicketResponse>), ApiError> {
    let Json(body) = payload.map_err(|rejection| bad_request(rejection.body_text()))?;

    let title = body.title.as_deref().unwrap_or_default().trim().to_string();
    if title.is_empty() {
        return Err(bad_request("title is required"));
    }

    let description = body
        .description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty());

    let explicit = body
        .priority
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty());

    let priority = match explicit {
        Some(p) => p.parse::<Priority>().map_err(error_response)?,
        None => {
            let suggestion = state
                .advisor()
                .suggest(&title, description.as_deref(), body.use_ai.unwrap_or(false))
                .await;
            PRIORITY_SUGGESTIONS_TOTAL
                .with_label_values(&[suggestion.source.as_str()])
                .inc();
            suggestion.priority
        }
    };

    let ticket = state
        .ticket_store()
        .create(CreateTicketRequest::new(title, description, priority))
        .map_err(error_response)?;

    TICKETS_CREATED_TOTAL
        .with_label_values(&[ticket.priority.as_str()])
        .inc();
    info!(ticket_id = ticket.id, priority = %ticket.priority, "Ticket created");

    Ok((StatusCode::CREATED, Json(TicketResponse::from(ticket))))
}

/// List all tickets, newest first
pub async fn list_tickets(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TicketResponse>>, ApiError> {
    let tickets = state.ticket_store().list().map_err(error_response)?;
    Ok(Json(tickets.into_iter().map(TicketResponse::from).collect()))
}

/// Get a ticket by ID
pub async fn get_ticket(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<TicketResponse>, ApiError> {
    let ticket = state.ticket_store().get(id).map_err(error_response)?;
    Ok(Json(TicketResponse::from(ticket)))
}

/// Update a ticket's status
pub async fn update_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    payload: Result<Json<UpdateStatusBody>, JsonRejection>,
) -> Result<Json<TicketResponse>, ApiError> {
    // Unknown ids report 404 even when the body is also invalid
    state.ticket_store().get(id).map_err(error_response)?;

    let Json(body) = payload.map_err(|rejection| bad_request(rejection.body_text()))?;

    let status = body
        .status
        .as_deref()
        .ok_or_else(|| bad_request("status is required"))?
        .parse::<TicketStatus>()
        .map_err(error_response)?;

    let ticket = state
        .ticket_store()
        .update_status(id, status)
        .map_err(error_response)?;

    TICKET_STATUS_UPDATES
        .with_label_values(&[status.as_str()])
        .inc();
    info!(ticket_id = id, status = %status, "Ticket status updated");

    Ok(Json(TicketResponse::from(ticket)))
}

/// Permanently delete a ticket
pub async fn delete_ticket(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.ticket_store().delete(id).map_err(error_response)?;

    TICKETS_DELETED_TOTAL.inc();
    info!(ticket_id = id, "Ticket deleted");

    Ok(StatusCode::NO_CONTENT)
}
