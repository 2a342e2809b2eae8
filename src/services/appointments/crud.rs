use anyhow::Result;
use chrono::NaiveDate;
use uuid::Uuid;

use super::AppointmentStore;
use crate::models::appointment::{Appointment, Appointments, TimeStamps};
use crate::services::time_grid::apply_time_to_date;
use crate::utils::date::{date_key, start_of_day};

impl AppointmentStore {
    /// Copy of the whole collection. Changes to the copy never reach the store.
    pub fn get_all(&self) -> Appointments {
        self.appointments.clone()
    }

    /// Copy of the appointments starting on `date`, in insertion order.
    pub fn appointments_on(&self, date: NaiveDate) -> Vec<Appointment> {
        self.appointments
            .get(&date_key(date, &self.date_key_format))
            .cloned()
            .unwrap_or_default()
    }

    pub fn find(&self, id: &str) -> Option<Appointment> {
        self.appointments
            .values()
            .flatten()
            .find(|appointment| appointment.id == id)
            .cloned()
    }

    /// Create or replace by id, filing the appointment under its start date.
    pub fn save(&mut self, appointment: Appointment) -> Result<()> {
        let mut updated = self.get_all();
        let replaced = remove_by_id(&mut updated, &appointment.id);

        let key = self.date_key(&appointment.start);
        log::debug!(
            "{} appointment {} under {}",
            if replaced { "Replacing" } else { "Adding" },
            appointment.id,
            key
        );
        updated.entry(key).or_default().push(appointment);

        self.commit(updated)
    }

    /// Remove the appointment with `id` from whichever day holds it.
    pub fn delete(&mut self, id: &str) -> Result<()> {
        let mut updated = self.get_all();
        if !remove_by_id(&mut updated, id) {
            log::debug!("Delete of unknown appointment {} ignored", id);
        }
        self.commit(updated)
    }

    /// A blank appointment on `date`, with a fresh id.
    ///
    /// Uses the configured default times when `time_stamps` is `None`.
    pub fn make_default(
        &self,
        date: NaiveDate,
        time_stamps: Option<&TimeStamps>,
    ) -> Result<Appointment> {
        let time_stamps = time_stamps.unwrap_or(&self.default_time_stamps);
        let day = start_of_day(date)?;

        Ok(Appointment {
            id: Uuid::new_v4().to_string(),
            title: String::new(),
            description: String::new(),
            start: apply_time_to_date(day, &time_stamps.start)?,
            end: apply_time_to_date(day, &time_stamps.end)?,
        })
    }

    /// Default start/end for a new appointment beginning at `start`: one hour
    /// later, or as far as the grid allows.
    pub fn suggested_time_stamps_from(&self, start: &str) -> TimeStamps {
        let grid = &self.time_intervals;
        let index = grid.signed_index_of(start);
        let end = grid
            .get_signed(index + 4)
            .or_else(|| grid.get_signed(index + 3))
            .unwrap_or_else(|| grid.last());

        TimeStamps::new(start, end)
    }
}

/// Drop every appointment with `id`, along with any day left empty.
fn remove_by_id(appointments: &mut Appointments, id: &str) -> bool {
    let mut removed = false;
    for day in appointments.values_mut() {
        let before = day.len();
        day.retain(|appointment| appointment.id != id);
        removed |= day.len() != before;
    }
    appointments.retain(|_, day| !day.is_empty());
    removed
}
