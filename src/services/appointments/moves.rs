use anyhow::Result;
use chrono::NaiveDate;

use super::AppointmentStore;
use crate::models::appointment::Appointment;
use crate::services::reschedule::{apply_slot_move, plan_slot_move, shift_to_date};

impl AppointmentStore {
    /// Move an appointment to another day, keeping its times, and save it.
    pub fn move_to_date(&mut self, appointment: Appointment, new_date: NaiveDate) -> Result<()> {
        let moved = shift_to_date(appointment, new_date)?;
        log::debug!("Moving appointment {} to {}", moved.id, new_date);
        self.save(moved)
    }

    /// Move an appointment to the hour of `new_start_label`, keeping its own
    /// minutes and its length in grid slots, and save it.
    ///
    /// When the computed start and end coincide the appointment is saved as is.
    pub fn move_to_time_slot(&mut self, appointment: Appointment, new_start_label: &str) -> Result<()> {
        let slot_move = plan_slot_move(&self.time_intervals, &appointment, new_start_label)?;

        if slot_move.is_noop() {
            log::debug!(
                "Move of appointment {} to {} collapses to {}, keeping times",
                appointment.id,
                new_start_label,
                slot_move.start
            );
            return self.save(appointment);
        }

        log::debug!(
            "Moving appointment {} to {}-{}",
            appointment.id,
            slot_move.start,
            slot_move.end
        );
        let moved = apply_slot_move(appointment, &slot_move)?;
        self.save(moved)
    }
}
