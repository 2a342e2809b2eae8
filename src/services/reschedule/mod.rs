//! Drag-and-drop rescheduling arithmetic.
//!
//! Durations are measured in time grid slots, not wall-clock minutes: an
//! appointment from `9:00am` to `10:00am` spans four slots and keeps spanning
//! four slots wherever it is dropped, unless the grid runs out.

use chrono::NaiveDate;

use crate::error::{CalendarError, Result};
use crate::models::appointment::Appointment;
use crate::services::time_grid::{apply_time_to_date, format_to_time_string, parse_time, TimeGrid};
use crate::utils::date::update_date_keep_time;

/// New start/end labels computed for a time slot drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotMove {
    pub start: String,
    pub end: String,
    /// Grid slots between the original start and end labels
    pub span: i64,
}

impl SlotMove {
    /// A move whose start and end collapse onto the same label leaves the
    /// appointment untouched.
    pub fn is_noop(&self) -> bool {
        self.start == self.end
    }
}

/// Take the hour and period of `target` and the minutes of `current`.
///
/// Dropping a `9:30am` appointment on the `11:00am` row gives `11:30am`.
pub fn snap_hour(target: &str, current: &str) -> Result<String> {
    let target_time = parse_time(target);
    let current_time = parse_time(current);
    let invalid = || CalendarError::InvalidTimeLabel(target.to_string());

    let hours = target_time.hours.filter(|h| (1..=12).contains(h)).ok_or_else(invalid)?;
    let am_pm = target_time.am_pm.ok_or_else(invalid)?;
    let minutes = current_time
        .valid_minutes()
        .ok_or_else(|| CalendarError::InvalidTimeLabel(current.to_string()))?;

    Ok(format!("{}:{:02}{}", hours, minutes, am_pm))
}

/// Compute the labels an appointment gets when dropped on `target_label`.
///
/// Off-grid labels rank as -1 in the span arithmetic, and an end index past
/// either edge of the grid saturates to the last slot.
pub fn plan_slot_move(grid: &TimeGrid, appointment: &Appointment, target_label: &str) -> Result<SlotMove> {
    let start_label = format_to_time_string(&appointment.start);
    let end_label = format_to_time_string(&appointment.end);
    let span = grid.signed_index_of(&end_label) - grid.signed_index_of(&start_label);

    let start = snap_hour(target_label, &start_label)?;
    let end = grid
        .get_signed(grid.signed_index_of(&start) + span)
        .unwrap_or_else(|| grid.last())
        .to_string();

    Ok(SlotMove { start, end, span })
}

/// Apply planned labels to the appointment's own start and end days.
pub fn apply_slot_move(appointment: Appointment, slot_move: &SlotMove) -> Result<Appointment> {
    let start = apply_time_to_date(appointment.start, &slot_move.start)?;
    let end = apply_time_to_date(appointment.end, &slot_move.end)?;
    Ok(Appointment {
        start,
        end,
        ..appointment
    })
}

/// Move both timestamps onto `new_date`, each keeping its time of day.
pub fn shift_to_date(mut appointment: Appointment, new_date: NaiveDate) -> Result<Appointment> {
    appointment.start = update_date_keep_time(appointment.start, new_date)?;
    appointment.end = update_date_keep_time(appointment.end, new_date)?;
    Ok(appointment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::date::local_from_naive;
    use chrono::Timelike;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn appointment_at(start: (u32, u32), end: (u32, u32)) -> Appointment {
        let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let start = local_from_naive(day.and_hms_opt(start.0, start.1, 0).unwrap()).unwrap();
        let end = local_from_naive(day.and_hms_opt(end.0, end.1, 0).unwrap()).unwrap();
        Appointment::new("a", "Meeting", start, end)
    }

    #[test_case("11:00am", "9:30am", "11:30am")]
    #[test_case("2:00pm", "9:00am", "2:00pm")]
    #[test_case("12:00am", "3:45pm", "12:45am")]
    #[test_case("11:15pm", "9:07am", "11:07pm" ; "target minutes are ignored")]
    fn test_snap_hour(target: &str, current: &str, expected: &str) {
        assert_eq!(snap_hour(target, current).unwrap(), expected);
    }

    #[test]
    fn test_snap_hour_rejects_malformed_target() {
        assert_eq!(
            snap_hour("later", "9:00am"),
            Err(CalendarError::InvalidTimeLabel("later".to_string()))
        );
    }

    #[test]
    fn test_plan_preserves_span() {
        let grid = TimeGrid::new();
        let appointment = appointment_at((9, 0), (10, 0));

        let planned = plan_slot_move(&grid, &appointment, "11:00am").unwrap();
        assert_eq!(planned.span, 4);
        assert_eq!(planned.start, "11:00am");
        assert_eq!(planned.end, "12:00pm");
        assert!(!planned.is_noop());
    }

    #[test]
    fn test_plan_clamps_to_last_slot() {
        let grid = TimeGrid::new();
        let appointment = appointment_at((9, 0), (12, 0));

        let planned = plan_slot_move(&grid, &appointment, "10:00pm").unwrap();
        assert_eq!(planned.start, "10:00pm");
        assert_eq!(planned.end, "11:45pm");
    }

    #[test]
    fn test_plan_off_grid_start_ranks_as_minus_one() {
        let grid = TimeGrid::new();
        // 9:07am and 1:07pm are not grid labels: span is 40 - (-1), and the
        // new end is walked from -1 again, landing back on 10:00am
        let appointment = appointment_at((9, 7), (10, 0));

        let planned = plan_slot_move(&grid, &appointment, "1:00pm").unwrap();
        assert_eq!(planned.span, 41);
        assert_eq!(planned.start, "1:07pm");
        assert_eq!(planned.end, "10:00am");
    }

    #[test]
    fn test_plan_noop_when_start_meets_end() {
        let grid = TimeGrid::new();
        let appointment = appointment_at((23, 45), (23, 45));

        let planned = plan_slot_move(&grid, &appointment, "11:00pm").unwrap();
        assert_eq!(planned.start, "11:45pm");
        assert!(planned.is_noop());
    }

    #[test]
    fn test_apply_slot_move_keeps_identity() {
        let appointment = appointment_at((9, 0), (10, 0)).with_description("notes");
        let planned = SlotMove {
            start: "1:15pm".to_string(),
            end: "2:15pm".to_string(),
            span: 4,
        };

        let moved = apply_slot_move(appointment.clone(), &planned).unwrap();
        assert_eq!(moved.id, appointment.id);
        assert_eq!(moved.description, "notes");
        assert_eq!((moved.start.hour(), moved.start.minute()), (13, 15));
        assert_eq!((moved.end.hour(), moved.end.minute()), (14, 15));
        assert_eq!(moved.start.date_naive(), appointment.start.date_naive());
    }

    #[test]
    fn test_shift_to_date_keeps_times() {
        let appointment = appointment_at((9, 30), (11, 0));
        let new_date = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();

        let moved = shift_to_date(appointment.clone(), new_date).unwrap();
        assert_eq!(moved.start.date_naive(), new_date);
        assert_eq!(moved.end.date_naive(), new_date);
        assert_eq!(moved.start.time(), appointment.start.time());
        assert_eq!(moved.end.time(), appointment.end.time());
    }
}
