// Date utility functions
// Date keys, local time conversion and month grid helpers

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, NaiveDateTime, TimeZone};

use crate::error::{CalendarError, Result};

/// Date key format matching a US locale short date, e.g. `5/1/2024`.
pub const DEFAULT_DATE_KEY_FORMAT: &str = "%-m/%-d/%Y";

/// Weeks shown by the month view.
pub const MONTH_GRID_WEEKS: usize = 5;

/// Format `date` with a format accepted by [`check_date_key_format`].
pub fn date_key(date: NaiveDate, format: &str) -> String {
    try_date_key(date, format).unwrap_or_default()
}

/// Format `date`, or `None` when the format is malformed or asks for fields a
/// date does not have (hours, offsets, time zones).
pub fn try_date_key(date: NaiveDate, format: &str) -> Option<String> {
    let items: Vec<Item> = StrftimeItems::new(format).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return None;
    }

    let mut key = String::new();
    write!(key, "{}", date.format_with_items(items.into_iter())).ok()?;
    Some(key)
}

/// Dates a key format must tell apart: neighbours in day, month and year,
/// plus month and year ends.
const KEY_FORMAT_SAMPLES: [(i32, u32, u32); 6] = [
    (2024, 5, 1),
    (2024, 5, 2),
    (2024, 6, 1),
    (2025, 5, 1),
    (1999, 12, 31),
    (2024, 2, 29),
];

/// Check that `format` can key appointments by day: it must format plain dates
/// and parse back to the same date, so every day gets its own key.
pub fn check_date_key_format(format: &str) -> std::result::Result<(), String> {
    for (year, month, day) in KEY_FORMAT_SAMPLES {
        let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
            continue;
        };

        let key = try_date_key(date, format).ok_or_else(|| {
            format!("Date key format '{}' cannot format a plain date", format)
        })?;

        if NaiveDate::parse_from_str(&key, format).ok() != Some(date) {
            return Err(format!(
                "Date key format '{}' does not identify a single day (got '{}' for {})",
                format, key, date
            ));
        }
    }
    Ok(())
}

/// Resolve a wall-clock time to a local timestamp.
///
/// Ambiguous times (DST fall-back) pick the earlier instant. Times inside a
/// DST gap are pushed forward by an hour, the same way browsers normalise them.
pub fn local_from_naive(naive: NaiveDateTime) -> Result<DateTime<Local>> {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .or_else(|| {
            Local
                .from_local_datetime(&(naive + Duration::hours(1)))
                .earliest()
        })
        .ok_or(CalendarError::NonexistentLocalTime(naive))
}

pub fn start_of_day(date: NaiveDate) -> Result<DateTime<Local>> {
    local_from_naive(date.and_time(chrono::NaiveTime::MIN))
}

/// Replace the calendar day of `timestamp` with `new_date`, keeping its time of day.
pub fn update_date_keep_time(
    timestamp: DateTime<Local>,
    new_date: NaiveDate,
) -> Result<DateTime<Local>> {
    local_from_naive(new_date.and_time(timestamp.time()))
}

/// The 5x7 grid of dates shown for the month containing `date`.
///
/// The first row starts on the Sunday on or before the 1st, so the tail of
/// the previous month and the head of the next one fill the edges.
pub fn dates_in_selected_month(date: NaiveDate) -> [[NaiveDate; 7]; MONTH_GRID_WEEKS] {
    let first = date.with_day(1).unwrap_or(date);
    let offset = first.weekday().num_days_from_sunday() as i64;
    let grid_start = first - Duration::days(offset);

    std::array::from_fn(|week| {
        std::array::from_fn(|day| grid_start + Duration::days((week * 7 + day) as i64))
    })
}
