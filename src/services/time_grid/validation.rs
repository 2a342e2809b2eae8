use super::TimeGrid;
use crate::models::appointment::{InvalidTimeStamps, TimeStamps};

/// Check a start/end label pair against the grid.
///
/// Equal labels are a mismatch. Otherwise the start must come strictly before
/// the end in grid order; a label missing from the grid ranks as -1, so
/// malformed input is always reported as an ordering error.
pub fn validate_time_range(grid: &TimeGrid, time_stamps: &TimeStamps) -> Option<InvalidTimeStamps> {
    if time_stamps.start == time_stamps.end {
        return Some(InvalidTimeStamps::mismatch());
    }

    let start_index = grid.signed_index_of(&time_stamps.start);
    let end_index = grid.signed_index_of(&time_stamps.end);

    if start_index >= end_index {
        return Some(InvalidTimeStamps::order());
    }
    None
}
