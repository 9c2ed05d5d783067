//! Ticket records and their storage.

mod sqlite_store;
mod store;
mod types;

pub use sqlite_store::SqliteTicketStore;
pub use store::{CreateTicketRequest, TicketError, TicketStore};
pub use types::{Priority, Ticket, TicketStatus};
