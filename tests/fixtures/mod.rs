// Test fixtures - reusable test data
// Provides consistent dates and appointments across integration tests

#![allow(dead_code)]

use appointment_calendar::models::appointment::Appointment;
use chrono::{Duration, Local, NaiveDate, TimeZone};

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// May 1, 2024 (a Wednesday)
    pub fn may_1_2024() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    pub fn may_2_2024() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 2).unwrap()
    }

    /// Feb 29, 2024 (leap year)
    pub fn leap_day_2024() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
    }
}

/// Sample appointments for testing
pub mod appointments {
    use super::*;

    /// Appointment on `date` from `hour:minute`, lasting `minutes`.
    pub fn at(id: &str, date: NaiveDate, hour: u32, minute: u32, minutes: i64) -> Appointment {
        let start = Local
            .from_local_datetime(&date.and_hms_opt(hour, minute, 0).unwrap())
            .earliest()
            .unwrap();
        Appointment::new(id, format!("Appointment {}", id), start, start + Duration::minutes(minutes))
            .with_description("Fixture")
    }

    /// One-hour checkup at 9:00am on May 1, 2024
    pub fn morning_checkup() -> Appointment {
        at("checkup", dates::may_1_2024(), 9, 0, 60)
    }

    /// 15-minute call at 2:45pm on May 1, 2024
    pub fn afternoon_call() -> Appointment {
        at("call", dates::may_1_2024(), 14, 45, 15)
    }
}
