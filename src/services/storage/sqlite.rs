use anyhow::{Context, Result};
use rusqlite::{self, params};

use super::KeyValueStore;
use crate::services::database::Database;

/// Key-value store backed by the `kv_store` SQLite table.
pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    /// Open the database at `path` and make sure the table exists.
    pub fn open(path: &str) -> Result<Self> {
        let db = Database::new(path)?;
        db.initialize_schema()?;
        Ok(Self { db })
    }
}

impl KeyValueStore for SqliteStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let result = self.db.connection().query_row(
            "SELECT value FROM kv_store WHERE key = ?1",
            [key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read key {}", key)),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.db
            .connection()
            .execute(
                "INSERT INTO kv_store (key, value, updated_at)
                 VALUES (?1, ?2, CURRENT_TIMESTAMP)
                 ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = excluded.updated_at",
                params![key, value],
            )
            .with_context(|| format!("Failed to write key {}", key))?;
        Ok(())
    }
}
