//! HTTP surface for the ticketdesk service.

pub mod api;
pub mod metrics;
pub mod state;
