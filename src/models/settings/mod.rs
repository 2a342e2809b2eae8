// Settings module
// Engine configuration, stored as TOML

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::services::time_grid::TimeGrid;
use crate::utils::date::check_date_key_format;

/// Where the appointment snapshot is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    #[default]
    Json,
    Sqlite,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub storage_backend: StorageBackend,
    /// Directory holding the data files; the platform data dir when unset
    pub data_dir: Option<PathBuf>,
    pub storage_key: String,
    /// chrono format string used to build date keys
    pub date_key_format: String,
    pub default_start: String,
    pub default_end: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage_backend: StorageBackend::default(),
            data_dir: None,
            storage_key: "appointments".to_string(),
            date_key_format: "%-m/%-d/%Y".to_string(),
            default_start: "12:00am".to_string(),
            default_end: "1:00am".to_string(),
        }
    }
}

impl Settings {
    /// Validate settings values
    pub fn validate(&self) -> Result<(), String> {
        if self.storage_key.trim().is_empty() {
            return Err("Storage key cannot be empty".to_string());
        }

        // The key names a file in the data dir
        if self.storage_key.contains(['/', '\\']) || self.storage_key.contains("..") {
            return Err(format!(
                "Storage key '{}' cannot contain path separators or '..'",
                self.storage_key
            ));
        }

        if self.date_key_format.trim().is_empty() {
            return Err("Date key format cannot be empty".to_string());
        }

        check_date_key_format(&self.date_key_format)?;

        let grid = TimeGrid::new();
        for label in [&self.default_start, &self.default_end] {
            if grid.index_of(label).is_none() {
                return Err(format!(
                    "Default time '{}' is not a quarter-hour label like '9:00am'",
                    label
                ));
            }
        }

        if grid.index_of(&self.default_start) >= grid.index_of(&self.default_end) {
            return Err("Default start must be before default end".to_string());
        }

        Ok(())
    }
}
