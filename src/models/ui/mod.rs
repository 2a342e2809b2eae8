// UI models module
// View selection and navigation vocabulary shared with the presentation layer

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewType {
    #[default]
    Day,
    Month,
}

impl fmt::Display for ViewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewType::Day => write!(f, "day"),
            ViewType::Month => write!(f, "month"),
        }
    }
}

/// Navigation direction for the previous/next buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    /// Signed step: -1 for previous, +1 for next
    pub fn step(self) -> i32 {
        match self {
            Direction::Previous => -1,
            Direction::Next => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolTip {
    Previous,
    Next,
}

impl fmt::Display for ToolTip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolTip::Previous => write!(f, "Previous"),
            ToolTip::Next => write!(f, "Next"),
        }
    }
}
