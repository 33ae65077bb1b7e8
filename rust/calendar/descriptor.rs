use chrono::prelude::*;
use serde::{Deserialize, Serialize};

use crate::json::JSON;

/// Facts about the week containing a given date.
///
/// `end_date` is always `start_date` plus 6 days, and `start_date` always falls on the first
/// weekday of the configuration that produced the descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekDescriptor {
    /// Week number within `week_year`, 1 to 53.
    pub week_number: u32,
    /// The year the week belongs to, which can differ from the calendar year near 1st January.
    pub week_year: i32,
    /// First day of the week.
    pub start_date: NaiveDate,
    /// Last day of the week, inclusive.
    pub end_date: NaiveDate,
    /// Label such as `"Jan 6 – Jan 12, 2025"`.
    pub display_range: String,
    /// Days left after today in the current week; 0 for any other week.
    pub days_remaining: u32,
    /// Whether the week contains "today" in the configured time zone.
    pub is_current_week: bool,
}

impl WeekDescriptor {
    /// Whether `date` lies within the week.
    pub fn contains(&self, date: &NaiveDate) -> bool {
        self.start_date <= *date && *date <= self.end_date
    }
}

impl JSON for WeekDescriptor {}

/// Format the label shown for a week spanning `start` to `end`.
pub(crate) fn display_range(start: &NaiveDate, end: &NaiveDate) -> String {
    if start.year() == end.year() {
        format!(
            "{} – {}, {}",
            start.format("%b %-d"),
            end.format("%b %-d"),
            end.year()
        )
    } else {
        format!("{} – {}", start.format("%b %-d, %Y"), end.format("%b %-d, %Y"))
    }
}
