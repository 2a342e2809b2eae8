//! Current date and view selection for the calendar screens.

use chrono::{Duration, Local, Months, NaiveDate};

use crate::models::ui::{Direction, ToolTip, ViewType};
use crate::utils::date::DEFAULT_DATE_KEY_FORMAT;
use crate::utils::date::date_key;

#[derive(Debug, Clone)]
pub struct DateManager {
    today: NaiveDate,
    current_date: NaiveDate,
    view_type: ViewType,
}

impl DateManager {
    /// Start on `today` in day view.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            current_date: today,
            view_type: ViewType::default(),
        }
    }

    /// Compares by date key, like the calendar cells do.
    pub fn is_today(&self, date: NaiveDate) -> bool {
        date_key(date, DEFAULT_DATE_KEY_FORMAT) == date_key(self.today, DEFAULT_DATE_KEY_FORMAT)
    }

    /// Jump back to the current wall-clock date.
    pub fn set_today(&mut self) {
        self.set_current_date(Local::now().date_naive());
    }

    pub fn current_date(&self) -> NaiveDate {
        self.current_date
    }

    pub fn set_current_date(&mut self, date: NaiveDate) {
        log::debug!("Current date set to {}", date);
        self.current_date = date;
    }

    pub fn view_type(&self) -> ViewType {
        self.view_type
    }

    pub fn set_view_type(&mut self, view_type: ViewType) {
        self.view_type = view_type;
    }

    /// Step one day in day view or one month in month view.
    ///
    /// Month steps clamp to the last day of the target month (Jan 31 -> Feb 29)
    /// instead of rolling over into the month after it (Mar 2).
    pub fn change_date_view(&mut self, direction: Direction) {
        let current = self.current_date;
        let next = match (self.view_type, direction) {
            (ViewType::Day, _) => current.checked_add_signed(Duration::days(direction.step() as i64)),
            (ViewType::Month, Direction::Next) => current.checked_add_months(Months::new(1)),
            (ViewType::Month, Direction::Previous) => current.checked_sub_months(Months::new(1)),
        };

        match next {
            Some(date) => self.set_current_date(date),
            None => log::warn!("Cannot move {:?} from {}: out of range", direction, current),
        }
    }

    /// e.g. `"Previous day"`, `"Next month"`
    pub fn tooltip_text(&self, tooltip: ToolTip) -> String {
        format!("{} {}", tooltip, self.view_type)
    }
}

impl Default for DateManager {
    fn default() -> Self {
        Self::new(Local::now().date_naive())
    }
}
