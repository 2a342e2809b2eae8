//! JSON snapshot encoding for the appointment collection.
//!
//! Timestamps travel as RFC 3339 strings through the typed `Appointment`
//! schema, so only the `start`/`end` fields are ever read as dates.

use anyhow::{Context, Result};

use crate::models::appointment::{Appointment, Appointments};
use crate::utils::date::date_key;

pub fn encode(appointments: &Appointments) -> Result<String> {
    serde_json::to_string(appointments).context("Failed to serialize appointments")
}

/// Decode a snapshot and regroup it under `date_key_format`.
///
/// Regrouping keeps every appointment in the bucket of its start date even
/// if the snapshot was written with another key format.
pub fn decode(data: &str, date_key_format: &str) -> Result<Appointments> {
    let stored: Appointments =
        serde_json::from_str(data).context("Failed to deserialize appointments snapshot")?;
    Ok(group_by_date(stored.into_values().flatten(), date_key_format))
}

/// Group appointments by the date key of their start, preserving order.
pub fn group_by_date(
    appointments: impl IntoIterator<Item = Appointment>,
    date_key_format: &str,
) -> Appointments {
    let mut grouped = Appointments::new();
    for appointment in appointments {
        let key = date_key(appointment.start.date_naive(), date_key_format);
        grouped.entry(key).or_default().push(appointment);
    }
    grouped
}
