//! Appointment store: the single owner of all appointments.
//! Holds the collection grouped by date key, persists it through a
//! key-value port and tells listeners about every change. Operations are
//! split across focused submodules.

use anyhow::{anyhow, Result};
use chrono::{DateTime, Local};

use crate::models::appointment::{Appointments, TimeStamps};
use crate::models::settings::Settings;
use crate::services::storage::KeyValueStore;
use crate::services::time_grid::TimeGrid;
use crate::utils::date::{date_key, DEFAULT_DATE_KEY_FORMAT};

pub mod crud;
mod listeners;
pub mod moves;
pub mod snapshot;

pub use listeners::SubscriptionId;
use listeners::ListenerRegistry;

pub const DEFAULT_STORAGE_KEY: &str = "appointments";

pub struct AppointmentStore {
    storage: Box<dyn KeyValueStore>,
    storage_key: String,
    date_key_format: String,
    default_time_stamps: TimeStamps,
    time_intervals: TimeGrid,
    appointments: Appointments,
    listeners: ListenerRegistry,
}

impl AppointmentStore {
    /// Load the store from `storage` using the default key and date format.
    pub fn load(storage: Box<dyn KeyValueStore>) -> Result<Self> {
        Self::load_with_settings(storage, &Settings::default())
    }

    /// Load the store, taking key, date key format and default times from `settings`.
    pub fn load_with_settings(storage: Box<dyn KeyValueStore>, settings: &Settings) -> Result<Self> {
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;

        let appointments = match storage.read(&settings.storage_key)? {
            Some(data) => snapshot::decode(&data, &settings.date_key_format)?,
            None => {
                log::info!(
                    "No stored appointments under '{}', starting empty",
                    settings.storage_key
                );
                Appointments::new()
            }
        };

        log::info!(
            "Loaded {} appointments across {} days",
            appointments.values().map(Vec::len).sum::<usize>(),
            appointments.len()
        );

        Ok(Self {
            storage,
            storage_key: settings.storage_key.clone(),
            date_key_format: settings.date_key_format.clone(),
            default_time_stamps: TimeStamps::new(&settings.default_start, &settings.default_end),
            time_intervals: TimeGrid::new(),
            appointments,
            listeners: ListenerRegistry::default(),
        })
    }

    /// The read-only quarter-hour grid used for all duration arithmetic.
    pub fn time_intervals(&self) -> &TimeGrid {
        &self.time_intervals
    }

    /// Date key of the day `timestamp` falls on.
    pub fn date_key(&self, timestamp: &DateTime<Local>) -> String {
        date_key(timestamp.date_naive(), &self.date_key_format)
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Register a change listener. It is called right away with the current
    /// collection, then after every mutation.
    pub fn subscribe(&mut self, listener: impl FnMut(&Appointments) + 'static) -> SubscriptionId {
        let mut listener = listener;
        listener(&self.appointments);
        self.listeners.add(Box::new(listener))
    }

    /// Returns false if the id was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.remove(id)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Replace the collection, notify listeners, then persist.
    ///
    /// Listeners always see the new state, even if the write fails.
    fn commit(&mut self, appointments: Appointments) -> Result<()> {
        self.appointments = appointments;
        self.listeners.notify(&self.appointments);

        let data = snapshot::encode(&self.appointments)?;
        self.storage.write(&self.storage_key, &data)?;
        log::debug!(
            "Persisted {} days of appointments under '{}'",
            self.appointments.len(),
            self.storage_key
        );
        Ok(())
    }
}

impl Default for AppointmentStore {
    fn default() -> Self {
        Self {
            storage: Box::new(crate::services::storage::MemoryStore::new()),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            date_key_format: DEFAULT_DATE_KEY_FORMAT.to_string(),
            default_time_stamps: TimeStamps::default(),
            time_intervals: TimeGrid::new(),
            appointments: Appointments::new(),
            listeners: ListenerRegistry::default(),
        }
    }
}
