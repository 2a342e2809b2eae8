// Property-based tests for time grid labels and slot moves

use appointment_calendar::models::appointment::TimeStamps;
use appointment_calendar::services::appointments::AppointmentStore;
use appointment_calendar::services::time_grid::{
    apply_time_to_date, format_to_time_string, generate_time_intervals, TimeGrid,
};
use appointment_calendar::utils::date::start_of_day;
use chrono::NaiveDate;
use proptest::prelude::*;

#[test]
fn test_grid_has_96_ordered_labels() {
    let labels = generate_time_intervals();
    assert_eq!(labels.len(), 96);
    assert_eq!(labels.first().map(String::as_str), Some("12:00am"));
    assert_eq!(labels.last().map(String::as_str), Some("11:45pm"));

    let day = start_of_day(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()).unwrap();
    let times: Vec<_> = labels
        .iter()
        .map(|label| apply_time_to_date(day, label).unwrap())
        .collect();
    assert!(times.windows(2).all(|pair| pair[0] < pair[1]));
}

proptest! {
    /// Property: applying a grid label to a date and formatting it back
    /// yields the same label (summer months, clear of DST transitions)
    #[test]
    fn prop_label_survives_apply_and_format(
        year in 2000..2040i32,
        month in 6..=8u32,
        day in 1..=28u32,
        index in 0..96usize,
    ) {
        let grid = TimeGrid::new();
        let label = grid.get(index).unwrap();
        let date = start_of_day(NaiveDate::from_ymd_opt(year, month, day).unwrap()).unwrap();

        let applied = apply_time_to_date(date, label).unwrap();
        prop_assert_eq!(format_to_time_string(&applied), label);
    }

    /// Property: moving to another slot keeps the length in slots unless the
    /// end would run past the last slot
    #[test]
    fn prop_slot_move_preserves_span(
        start in 0..95usize,
        length in 1..12usize,
        target_hour in 0..24usize,
    ) {
        let grid = TimeGrid::new();
        let end = (start + length).min(95);
        prop_assume!(end > start);
        // a start on the very last slot collapses the move and keeps the old times
        prop_assume!(target_hour * 4 + start % 4 < 95);

        let mut store = AppointmentStore::default();
        let stamps = TimeStamps::new(grid.get(start).unwrap(), grid.get(end).unwrap());
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let appointment = store.make_default(date, Some(&stamps)).unwrap();
        let id = appointment.id.clone();
        let span = end - start;

        let target = grid.get(target_hour * 4).unwrap().to_string();
        store.move_to_time_slot(appointment, &target).unwrap();

        let moved = store.find(&id).unwrap();
        let new_start = grid.index_of(&format_to_time_string(&moved.start)).unwrap();
        let new_end = grid.index_of(&format_to_time_string(&moved.end)).unwrap();

        prop_assert_eq!(new_start, target_hour * 4 + start % 4);
        prop_assert_eq!(new_end, (new_start + span).min(95));
    }
}
