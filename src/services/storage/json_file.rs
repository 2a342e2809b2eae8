use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use super::KeyValueStore;

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for JsonFileStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        let data = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {} from {}", key, path.display()))?;
        Ok(Some(data))
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create dir {}", self.dir.display()))?;

        let path = self.path_for(key);
        fs::write(&path, value)
            .with_context(|| format!("failed to write {} to {}", key, path.display()))?;
        Ok(())
    }
}
