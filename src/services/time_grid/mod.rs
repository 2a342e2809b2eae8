//! Quarter-hour time grid and 12-hour clock label handling.
//!
//! Labels look like `"2:30pm"`: an unpadded 12-hour hour, a two digit minute
//! and a lowercase period with no space. The grid holds the 96 quarter-hour
//! labels of a day in clock order and is the unit of all duration arithmetic.

use std::fmt;

use chrono::{DateTime, Local, Timelike};

use crate::error::{CalendarError, Result};
use crate::models::appointment::HourlyTime;
use crate::utils::date::local_from_naive;

pub mod validation;

pub use validation::validate_time_range;

/// Minute offsets of the slots within each hour
pub const SLOT_MINUTES: [u32; 4] = [0, 15, 30, 45];
pub const SLOTS_PER_HOUR: usize = SLOT_MINUTES.len();
pub const SLOTS_PER_DAY: usize = 24 * SLOTS_PER_HOUR;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    pub fn from_hour(hour24: u32) -> Self {
        if hour24 < 12 {
            Meridiem::Am
        } else {
            Meridiem::Pm
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Meridiem::Am => "am",
            Meridiem::Pm => "pm",
        }
    }
}

impl fmt::Display for Meridiem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Components of a 12-hour clock label.
///
/// Parsing never fails; parts that cannot be read are `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedTime {
    pub hours: Option<u32>,
    pub minutes: Option<u32>,
    pub am_pm: Option<Meridiem>,
}

impl ParsedTime {
    /// 24-hour clock hour, or `None` if the label was not a valid time.
    pub fn hour24(&self) -> Option<u32> {
        let hours = self.hours.filter(|h| (1..=12).contains(h))?;
        match self.am_pm? {
            Meridiem::Pm if hours != 12 => Some(hours + 12),
            Meridiem::Am if hours == 12 => Some(0),
            _ => Some(hours),
        }
    }

    pub fn valid_minutes(&self) -> Option<u32> {
        self.minutes.filter(|m| *m < 60)
    }
}

fn hour12(hour24: u32) -> u32 {
    match hour24 % 12 {
        0 => 12,
        hour => hour,
    }
}

/// All 96 quarter-hour labels of a day, `"12:00am"` through `"11:45pm"`.
pub fn generate_time_intervals() -> Vec<String> {
    let mut times = Vec::with_capacity(SLOTS_PER_DAY);
    for hour in 0..24 {
        for minute in SLOT_MINUTES {
            times.push(format!(
                "{}:{:02}{}",
                hour12(hour),
                minute,
                Meridiem::from_hour(hour)
            ));
        }
    }
    times
}

/// The 24 hour rows of the day view.
pub fn generate_hourly_labels() -> Vec<HourlyTime> {
    (0..24)
        .map(|hour| {
            let am_pm = Meridiem::from_hour(hour);
            HourlyTime {
                plain_time: format!("{} {}", hour12(hour), am_pm),
                start_time: format!("{}:00{}", hour12(hour), am_pm),
            }
        })
        .collect()
}

/// Split a label on its am/pm suffix (any case), then on `:`.
pub fn parse_time(label: &str) -> ParsedTime {
    let lower = label.to_ascii_lowercase();
    let suffix = match (lower.find("am"), lower.find("pm")) {
        (Some(am), Some(pm)) if pm < am => Some((pm, Meridiem::Pm)),
        (Some(am), _) => Some((am, Meridiem::Am)),
        (None, Some(pm)) => Some((pm, Meridiem::Pm)),
        (None, None) => None,
    };

    let (time_part, am_pm) = match suffix {
        Some((position, meridiem)) => (&label[..position], Some(meridiem)),
        None => (label, None),
    };

    let mut parts = time_part.split(':');
    let hours = parts.next().and_then(|h| h.trim().parse().ok());
    let minutes = parts.next().and_then(|m| m.trim().parse().ok());

    ParsedTime {
        hours,
        minutes,
        am_pm,
    }
}

/// Format the time of day as a label. Minutes are kept as-is, so off-grid
/// times produce labels that are not in the grid (e.g. `"9:07am"`).
pub fn format_to_time_string(time: &impl Timelike) -> String {
    format!(
        "{}:{:02}{}",
        hour12(time.hour()),
        time.minute(),
        Meridiem::from_hour(time.hour())
    )
}

/// Set hour and minute from `label`, keeping the date and the seconds of `date`.
pub fn apply_time_to_date(date: DateTime<Local>, label: &str) -> Result<DateTime<Local>> {
    let parsed = parse_time(label);
    let invalid = || CalendarError::InvalidTimeLabel(label.to_string());
    let hour = parsed.hour24().ok_or_else(invalid)?;
    let minute = parsed.valid_minutes().ok_or_else(invalid)?;

    let naive = date
        .naive_local()
        .with_hour(hour)
        .and_then(|dt| dt.with_minute(minute))
        .ok_or_else(invalid)?;
    local_from_naive(naive)
}

/// The ordered quarter-hour labels of a day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeGrid {
    labels: Vec<String>,
}

impl TimeGrid {
    pub fn new() -> Self {
        Self {
            labels: generate_time_intervals(),
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// `"11:45pm"`
    pub fn last(&self) -> &str {
        &self.labels[self.labels.len() - 1]
    }

    /// Position of `label` in the grid; `None` for off-grid or malformed labels.
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|entry| entry == label)
    }

    /// Signed position used by duration arithmetic: a missing label counts as -1.
    pub fn signed_index_of(&self, label: &str) -> i64 {
        self.index_of(label).map_or(-1, |index| index as i64)
    }

    /// Label at a signed position, `None` when it falls outside the grid.
    pub fn get_signed(&self, index: i64) -> Option<&str> {
        usize::try_from(index).ok().and_then(|index| self.get(index))
    }
}

impl Default for TimeGrid {
    fn default() -> Self {
        Self::new()
    }
}
