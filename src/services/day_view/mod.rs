//! Day view projection: one day's appointments laid out in hourly rows.

use anyhow::Result;

use crate::models::appointment::{Appointment, HourlyBucket};
use crate::services::appointments::AppointmentStore;
use crate::services::date_manager::DateManager;
use crate::services::time_grid::{format_to_time_string, generate_hourly_labels, parse_time};

/// Whether `check_time` belongs to the hour row starting at `start_time`.
///
/// Only hour and period are compared; minutes are ignored, so `"2:45pm"`
/// matches the `"2:00pm"` row and no other.
pub fn is_time_equal_or_after(start_time: &str, check_time: &str) -> bool {
    let start = parse_time(start_time);
    let check = parse_time(check_time);
    start.hours.is_some() && start.hours == check.hours && start.am_pm == check.am_pm
}

/// Group appointments into the 24 hour rows of the day view.
pub fn hourly_appointments(appointments: &[Appointment]) -> Vec<HourlyBucket> {
    let start_labels: Vec<String> = appointments
        .iter()
        .map(|appointment| format_to_time_string(&appointment.start))
        .collect();

    generate_hourly_labels()
        .into_iter()
        .map(|hour| {
            let data = appointments
                .iter()
                .zip(&start_labels)
                .filter(|(_, label)| is_time_equal_or_after(&hour.start_time, label))
                .map(|(appointment, _)| appointment.clone())
                .collect();

            HourlyBucket {
                plain_time: hour.plain_time,
                start_time: hour.start_time,
                data,
            }
        })
        .collect()
}

/// Day view operations for the manager's current date.
pub struct DayViewService<'a> {
    store: &'a mut AppointmentStore,
    dates: &'a DateManager,
}

impl<'a> DayViewService<'a> {
    pub fn new(store: &'a mut AppointmentStore, dates: &'a DateManager) -> Self {
        Self { store, dates }
    }

    /// Hour rows for the current date.
    pub fn day_appointments(&self) -> Vec<HourlyBucket> {
        hourly_appointments(&self.store.appointments_on(self.dates.current_date()))
    }

    /// Drop an appointment on an hour row.
    pub fn move_appointment_to_time_stamp(
        &mut self,
        appointment: Appointment,
        new_start_time: &str,
    ) -> Result<()> {
        self.store.move_to_time_slot(appointment, new_start_time)
    }

    /// Blank appointment on the current date starting at `start`, one hour long
    /// where the grid allows.
    pub fn create_new_appointment(&self, start: &str) -> Result<Appointment> {
        let time_stamps = self.store.suggested_time_stamps_from(start);
        self.store
            .make_default(self.dates.current_date(), Some(&time_stamps))
    }
}
