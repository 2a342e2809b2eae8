//! Domain errors raised by the scheduling engine.

use chrono::NaiveDateTime;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    #[error("Invalid time label: {0:?}")]
    InvalidTimeLabel(String),

    #[error("Local time {0} does not exist in the current time zone")]
    NonexistentLocalTime(NaiveDateTime),
}

pub type Result<T> = std::result::Result<T, CalendarError>;
