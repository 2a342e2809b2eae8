use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;

use crate::models::settings::Settings;
use crate::services::storage::{open_storage, KeyValueStore};

const CONFIG_FILE_NAME: &str = "settings.toml";

/// Loads and saves `Settings` as a TOML file.
pub struct SettingsService {
    path: PathBuf,
}

impl SettingsService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Service for the platform config file, or `./settings.toml` when no
    /// home directory can be resolved.
    pub fn from_project_dirs() -> Self {
        match project_dirs() {
            Some(dirs) => Self::new(dirs.config_dir().join(CONFIG_FILE_NAME)),
            None => {
                log::warn!("Unable to resolve project directory; using current dir for settings");
                Self::new(CONFIG_FILE_NAME)
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the settings file. A missing file yields the defaults.
    pub fn get(&self) -> Result<Settings> {
        if !self.path.exists() {
            log::info!(
                "No settings at {}, using defaults",
                self.path.display()
            );
            return Ok(Settings::default());
        }

        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read settings from {}", self.path.display()))?;
        let settings: Settings = toml::from_str(&data)
            .with_context(|| format!("failed to parse settings from {}", self.path.display()))?;

        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings in {}: {}", self.path.display(), e))?;

        Ok(settings)
    }

    /// Validate and write `settings`, creating the parent directory.
    pub fn update(&self, settings: &Settings) -> Result<()> {
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create dir {}", parent.display()))?;
        }

        let data = toml::to_string_pretty(settings).context("Failed to serialize settings")?;
        fs::write(&self.path, data)
            .with_context(|| format!("failed to write settings to {}", self.path.display()))?;
        Ok(())
    }

    pub fn reset(&self) -> Result<()> {
        self.update(&Settings::default())
    }

    /// `data_dir` from the settings, else the platform data directory.
    pub fn data_dir(settings: &Settings) -> PathBuf {
        if let Some(dir) = &settings.data_dir {
            return dir.clone();
        }

        match project_dirs() {
            Some(dirs) => dirs.data_dir().to_path_buf(),
            None => {
                log::warn!("Unable to resolve project directory; using current dir for data");
                PathBuf::from(".")
            }
        }
    }

    /// Open the storage backend named by `settings`.
    pub fn open_storage(settings: &Settings) -> Result<Box<dyn KeyValueStore>> {
        open_storage(settings.storage_backend, &Self::data_dir(settings))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "AppointmentCalendar", "AppointmentCalendar")
}
