//! Key-value persistence port for appointment snapshots.
//!
//! The appointment store only needs to read and write one serialized
//! snapshot under a key. Backends: in-memory (tests, ephemeral sessions),
//! a JSON file per key, and a SQLite table.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use anyhow::{Context, Result};

use crate::models::settings::StorageBackend;

pub mod json_file;
pub mod sqlite;

pub use json_file::JsonFileStore;
pub use sqlite::SqliteStore;

#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore {
    /// Read the value stored under `key`, `None` if nothing was written yet.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn write(&self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store. Clones share the same map, so a test can keep a handle
/// to inspect what the appointment store persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::new();
        store.entries.borrow_mut().insert(key.into(), value.into());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File name of the SQLite database inside the data directory.
pub const SQLITE_FILE_NAME: &str = "appointments.db";

/// Open the configured backend rooted at `data_dir`.
pub fn open_storage(backend: StorageBackend, data_dir: &Path) -> Result<Box<dyn KeyValueStore>> {
    log::info!("Opening {:?} storage in {}", backend, data_dir.display());

    match backend {
        StorageBackend::Memory => Ok(Box::new(MemoryStore::new())),
        StorageBackend::Json => Ok(Box::new(JsonFileStore::new(data_dir))),
        StorageBackend::Sqlite => {
            fs::create_dir_all(data_dir)
                .with_context(|| format!("failed to create dir {}", data_dir.display()))?;
            let path = data_dir.join(SQLITE_FILE_NAME);
            let store = SqliteStore::open(&path.to_string_lossy())?;
            Ok(Box::new(store))
        }
    }
}
