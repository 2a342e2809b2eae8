// Database service module
// SQLite connection and schema for the key-value snapshot table

use anyhow::{Context, Result};
use rusqlite::Connection;

/// Thin wrapper around a SQLite connection.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Create a new database connection
    ///
    /// # Arguments
    /// * `path` - Path to the SQLite database file (or ":memory:" for in-memory)
    ///
    /// # Examples
    /// ```
    /// use appointment_calendar::services::database::Database;
    /// let db = Database::new(":memory:").unwrap();
    /// ```
    pub fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database at {}", path))?;

        Ok(Self { conn })
    }

    /// Creates the key-value table if it does not exist.
    pub fn initialize_schema(&self) -> Result<()> {
        self.conn
            .execute(
                "CREATE TABLE IF NOT EXISTS kv_store (
                    key TEXT PRIMARY KEY NOT NULL,
                    value TEXT NOT NULL,
                    updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
                )",
                [],
            )
            .context("Failed to create kv_store table")?;

        Ok(())
    }

    /// Get a reference to the database connection
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}
