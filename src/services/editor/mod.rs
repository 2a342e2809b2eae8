//! Create/edit form for a single appointment.

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::appointment::{Appointment, InvalidTimeStamps, TimeStamps};
use crate::services::appointments::AppointmentStore;
use crate::services::time_grid::{apply_time_to_date, format_to_time_string, validate_time_range, TimeGrid};
use crate::utils::date::start_of_day;

/// Problems found in a submitted form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormErrors {
    pub title_required: bool,
    pub description_required: bool,
    pub time: Option<InvalidTimeStamps>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        !self.title_required && !self.description_required && self.time.is_none()
    }

    /// User-facing messages, one per problem.
    pub fn messages(&self) -> Vec<&'static str> {
        let mut messages = Vec::new();
        if self.title_required {
            messages.push("Title is required");
        }
        if self.description_required {
            messages.push("Description is required");
        }
        if let Some(time) = self.time {
            if time.time_mismatch {
                messages.push("Start and end time cannot be the same");
            }
            if time.time_order {
                messages.push("Start time must be before end time");
            }
        }
        messages
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentForm {
    pub id: String,
    pub date: NaiveDate,
    pub title: String,
    /// Grid label, e.g. `"9:00am"`
    pub start: String,
    pub end: String,
    pub description: String,
}

impl AppointmentForm {
    pub fn from_appointment(appointment: &Appointment) -> Self {
        Self {
            id: appointment.id.clone(),
            date: appointment.start.date_naive(),
            title: appointment.title.clone(),
            start: format_to_time_string(&appointment.start),
            end: format_to_time_string(&appointment.end),
            description: appointment.description.clone(),
        }
    }

    pub fn time_stamps(&self) -> TimeStamps {
        TimeStamps::new(&self.start, &self.end)
    }

    pub fn validate(&self, grid: &TimeGrid) -> std::result::Result<(), FormErrors> {
        let errors = FormErrors {
            title_required: self.title.trim().is_empty(),
            description_required: self.description.trim().is_empty(),
            time: validate_time_range(grid, &self.time_stamps()),
        };

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Build the appointment with both labels applied to `date`.
    pub fn into_appointment(self) -> Result<Appointment> {
        let day = start_of_day(self.date)?;
        Ok(Appointment {
            start: apply_time_to_date(day, &self.start)?,
            end: apply_time_to_date(day, &self.end)?,
            id: self.id,
            title: self.title,
            description: self.description,
        })
    }

    /// Validate, then save through the store.
    pub fn submit(self, store: &mut AppointmentStore) -> Result<()> {
        if let Err(errors) = self.validate(store.time_intervals()) {
            log::debug!("Rejected form for appointment {}: {:?}", self.id, errors);
            return Err(anyhow!(
                "Invalid appointment: {}",
                errors.messages().join(", ")
            ));
        }

        let appointment = self.into_appointment()?;
        store.save(appointment)
    }

    pub fn remove(&self, store: &mut AppointmentStore) -> Result<()> {
        store.delete(&self.id)
    }
}
