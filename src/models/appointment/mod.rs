// Appointment module
// Appointment model and the per-day collection it is grouped into

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Local};
use serde::{Deserialize, Serialize};

/// A single time-boxed appointment.
///
/// `start < end` is expected but only enforced by the interactive editor;
/// drag-and-drop moves may produce any pair the grid arithmetic yields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
}

impl Appointment {
    /// Create an appointment with an explicit id.
    ///
    /// # Examples
    /// ```
    /// use appointment_calendar::models::appointment::Appointment;
    /// use chrono::{Duration, Local};
    ///
    /// let start = Local::now();
    /// let appointment = Appointment::new("a-1", "Dentist", start, start + Duration::hours(1));
    /// assert_eq!(appointment.duration(), Duration::hours(1));
    /// ```
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start: DateTime<Local>,
        end: DateTime<Local>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            start,
            end,
        }
    }

    /// Set the description, builder style.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Wall-clock length of the appointment.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// Appointments grouped by the date key of their start timestamp.
pub type Appointments = BTreeMap<String, Vec<Appointment>>;

/// A start/end pair of time grid labels, e.g. `"9:00am"` / `"10:00am"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeStamps {
    pub start: String,
    pub end: String,
}

impl TimeStamps {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

impl Default for TimeStamps {
    fn default() -> Self {
        Self::new("12:00am", "1:00am")
    }
}

/// Flags reported by time range validation. Unset flags are omitted when serialized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidTimeStamps {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub time_order: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub time_mismatch: bool,
}

impl InvalidTimeStamps {
    pub fn mismatch() -> Self {
        Self {
            time_mismatch: true,
            ..Self::default()
        }
    }

    pub fn order() -> Self {
        Self {
            time_order: true,
            ..Self::default()
        }
    }
}

/// One hour row of the day view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyTime {
    /// Display label, e.g. `"2 pm"`
    pub plain_time: String,
    /// Canonical grid label, e.g. `"2:00pm"`
    pub start_time: String,
}

/// An hour row together with the appointments assigned to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyBucket {
    pub plain_time: String,
    pub start_time: String,
    pub data: Vec<Appointment>,
}
