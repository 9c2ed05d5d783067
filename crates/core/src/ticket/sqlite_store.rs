//! SQLite-backed ticket store implementation.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, types::Type, Connection};
use tracing::debug;

use super::{CreateTicketRequest, Priority, Ticket, TicketError, TicketStatus, TicketStore};

const SELECT_COLUMNS: &str = "SELECT id, title, description, priority, status, created_at FROM tickets";

/// SQLite-backed ticket store.
pub struct SqliteTicketStore {
    conn: Mutex<Connection>,
}

impl SqliteTicketStore {
    /// Create a new SQLite ticket store, creating the database file and tables if needed.
    pub fn new(path: &Path) -> Result<Self, TicketError> {
        let conn = Connection::open(path).map_err(|e| TicketError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory SQLite ticket store (useful for testing).
    pub fn in_memory() -> Result<Self, TicketError> {
        let conn =
            Connection::open_in_memory().map_err(|e| TicketError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn initialize_schema(conn: &Connection) -> Result<(), TicketError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS tickets (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                description TEXT,
                priority TEXT NOT NULL DEFAULT 'MEDIUM',
                status TEXT NOT NULL DEFAULT 'NEW',
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_tickets_created_at ON tickets(created_at DESC);
            "#,
        )
        .map_err(|e| TicketError::Database(e.to_string()))
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, TicketError> {
        self.conn
            .lock()
            .map_err(|_| TicketError::Database("connection lock poisoned".to_string()))
    }

    fn fetch(conn: &Connection, id: i64) -> Result<Ticket, TicketError> {
        let result = conn.query_row(
            &format!("{} WHERE id = ?", SELECT_COLUMNS),
            params![id],
            Self::row_to_ticket,
        );

        match result {
            Ok(ticket) => Ok(ticket),
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(TicketError::NotFound(id)),
            Err(e) => Err(TicketError::Database(e.to_string())),
        }
    }

    fn row_to_ticket(row: &rusqlite::Row) -> rusqlite::Result<Ticket> {
        let id: i64 = row.get(0)?;
        let title: String = row.get(1)?;
        let description: Option<String> = row.get(2)?;
        let priority_str: String = row.get(3)?;
        let status_str: String = row.get(4)?;
        let created_at_str: String = row.get(5)?;

        let priority: Priority = priority_str
            .parse()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;

        let status: TicketStatus = status_str
            .parse()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?;

        let created_at = DateTime::parse_from_rfc3339(&created_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e)))?;

        Ok(Ticket {
            id,
            title,
            description,
            priority,
            status,
            created_at,
        })
    }
}

impl TicketStore for SqliteTicketStore {
    fn create(&self, request: CreateTicketRequest) -> Result<Ticket, TicketError> {
        let title = request.title.trim();
        if title.is_empty() {
            return Err(TicketError::Validation("title is required".to_string()));
        }

        let description = request
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        let conn = self.conn()?;
        let now = Utc::now();

        // Fixed-width timestamps keep lexical order equal to chronological order
        conn.execute(
            "INSERT INTO tickets (title, description, priority, status, created_at) VALUES (?, ?, ?, ?, ?)",
            params![
                title,
                description,
                request.priority.as_str(),
                request.status.as_str(),
                now.to_rfc3339_opts(SecondsFormat::Micros, true),
            ],
        )
        .map_err(|e| TicketError::Database(e.to_string()))?;

        let id = conn.last_insert_rowid();
        debug!(ticket_id = id, priority = %request.priority, "Inserted ticket");

        Self::fetch(&conn, id)
    }

    fn list(&self) -> Result<Vec<Ticket>, TicketError> {
        let conn = self.conn()?;

        let sql = format!("{} ORDER BY created_at DESC, id DESC", SELECT_COLUMNS);

        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| TicketError::Database(e.to_string()))?;

        let rows = stmt
            .query_map([], Self::row_to_ticket)
            .map_err(|e| TicketError::Database(e.to_string()))?;

        let mut tickets = Vec::new();
        for row_result in rows {
            let ticket = row_result.map_err(|e| TicketError::Database(e.to_string()))?;
            tickets.push(ticket);
        }

        Ok(tickets)
    }

    fn get(&self, id: i64) -> Result<Ticket, TicketError> {
        let conn = self.conn()?;
        Self::fetch(&conn, id)
    }

    fn update_status(&self, id: i64, status: TicketStatus) -> Result<Ticket, TicketError> {
        let conn = self.conn()?;

        let changed = conn
            .execute(
                "UPDATE tickets SET status = ? WHERE id = ?",
                params![status.as_str(), id],
            )
            .map_err(|e| TicketError::Database(e.to_string()))?;

        if changed == 0 {
            return Err(TicketError::NotFound(id));
        }

        Self::fetch(&conn, id)
    }

    fn delete(&self, id: i64) -> Result<(), TicketError> {
        let conn = self.conn()?;

        let deleted = conn
            .execute("DELETE FROM tickets WHERE id = ?", params![id])
            .map_err(|e| TicketError::Database(e.to_string()))?;

        if deleted == 0 {
            return Err(TicketError::NotFound(id));
        }

        Ok(())
    }
}
