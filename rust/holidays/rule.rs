use chrono::prelude::*;
use chrono::Days;
use serde::{Deserialize, Serialize};

use crate::calendar::{days_in_month, weekday_from_number};
use crate::holidays::{easter_sunday, equinox_or_solstice};
use crate::json::JSON;
use crate::AlmanacError;

/// The parametric rule placing a holiday within a given year.
///
/// Weekdays use the canonical numbering 1=Sun,.., 7=Sat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleKind {
    /// The same month and day every year.
    Fixed { month: u32, day: u32 },
    /// A signed number of days from Easter Sunday.
    EasterRelative { day_offset: i32 },
    /// The first `weekday` between `day_range_start` and `day_range_end` (inclusive) of `month`.
    FloatingWeekdayInRange {
        month: u32,
        weekday: u8,
        day_range_start: u32,
        day_range_end: u32,
    },
    /// The `ordinal`-th `weekday` of `month`, or the last one if `ordinal` is -1.
    NthWeekdayOfMonth { month: u32, weekday: u8, ordinal: i32 },
    /// The equinox or solstice of `month` (3, 6, 9 or 12).
    Astronomical { month: u32 },
}

impl RuleKind {
    /// Return the date of the rule in `year`, or `None` if it does not occur that year.
    ///
    /// # Examples
    /// ```rust
    /// # use almanac::holidays::RuleKind;
    /// # use almanac::calendar::ndate;
    /// // Last Sunday of November.
    /// let rule = RuleKind::NthWeekdayOfMonth { month: 11, weekday: 1, ordinal: -1 };
    /// assert_eq!(rule.resolve(2025), Some(ndate(2025, 11, 30)));
    /// // 29th February does not occur in 2025.
    /// assert_eq!(RuleKind::Fixed { month: 2, day: 29 }.resolve(2025), None);
    /// ```
    pub fn resolve(&self, year: i32) -> Option<NaiveDate> {
        match *self {
            RuleKind::Fixed { month, day } => NaiveDate::from_ymd_opt(year, month, day),
            RuleKind::EasterRelative { day_offset } => {
                let easter = easter_sunday(year)?;
                let days = Days::new(u64::from(day_offset.unsigned_abs()));
                if day_offset < 0 {
                    easter.checked_sub_days(days)
                } else {
                    easter.checked_add_days(days)
                }
            }
            RuleKind::FloatingWeekdayInRange {
                month,
                weekday,
                day_range_start,
                day_range_end,
            } => first_weekday_in_range(year, month, weekday, day_range_start, day_range_end),
            RuleKind::NthWeekdayOfMonth {
                month,
                weekday,
                ordinal,
            } => nth_weekday_of_month(year, month, weekday, ordinal),
            RuleKind::Astronomical { month } => equinox_or_solstice(month, year),
        }
    }

    // Reject parameters that can never resolve. `None` when valid.
    fn invalid_reason(&self) -> Option<String> {
        let month_ok = |m: u32| (1..=12).contains(&m);
        let weekday_ok = |w: u8| weekday_from_number(w).is_some();
        match *self {
            RuleKind::Fixed { month, day } => {
                // 2000 is a leap year, so 29th February is accepted.
                match days_in_month(2000, month) {
                    None => Some(format!("month {} is out of range", month)),
                    Some(last) if day == 0 || day > last => {
                        Some(format!("day {} does not exist in month {}", day, month))
                    }
                    _ => None,
                }
            }
            RuleKind::EasterRelative { .. } => None,
            RuleKind::FloatingWeekdayInRange {
                month,
                weekday,
                day_range_start,
                day_range_end,
            } => {
                if !month_ok(month) {
                    Some(format!("month {} is out of range", month))
                } else if !weekday_ok(weekday) {
                    Some(format!("weekday {} is out of range", weekday))
                } else if day_range_start == 0
                    || day_range_end > 31
                    || day_range_start > day_range_end
                {
                    Some(format!(
                        "day range {}..={} is invalid",
                        day_range_start, day_range_end
                    ))
                } else {
                    None
                }
            }
            RuleKind::NthWeekdayOfMonth {
                month,
                weekday,
                ordinal,
            } => {
                if !month_ok(month) {
                    Some(format!("month {} is out of range", month))
                } else if !weekday_ok(weekday) {
                    Some(format!("weekday {} is out of range", weekday))
                } else if !(ordinal == -1 || (1..=5).contains(&ordinal)) {
                    Some(format!("ordinal {} must be -1 or 1..=5", ordinal))
                } else {
                    None
                }
            }
            RuleKind::Astronomical { month } => {
                if [3, 6, 9, 12].contains(&month) {
                    None
                } else {
                    Some(format!("month {} has no equinox or solstice", month))
                }
            }
        }
    }
}

/// Scan forward through the bounded day range for the first date falling on `weekday`.
fn first_weekday_in_range(
    year: i32,
    month: u32,
    weekday: u8,
    day_range_start: u32,
    day_range_end: u32,
) -> Option<NaiveDate> {
    let weekday = weekday_from_number(weekday)?;
    (day_range_start..=day_range_end)
        .filter_map(|day| NaiveDate::from_ymd_opt(year, month, day))
        .find(|date| date.weekday() == weekday)
}

/// Count `weekday` occurrences forward from the 1st, or scan back at most 7 days from the
/// last day of the month when `ordinal` is -1.
fn nth_weekday_of_month(year: i32, month: u32, weekday: u8, ordinal: i32) -> Option<NaiveDate> {
    let weekday = weekday_from_number(weekday)?;
    let last = days_in_month(year, month)?;
    if ordinal >= 1 {
        (1..=last)
            .filter_map(|day| NaiveDate::from_ymd_opt(year, month, day))
            .filter(|date| date.weekday() == weekday)
            .nth(usize::try_from(ordinal - 1).ok()?)
    } else if ordinal == -1 {
        let last_date = NaiveDate::from_ymd_opt(year, month, last)?;
        (0..7)
            .filter_map(|i| last_date.checked_sub_days(Days::new(i)))
            .find(|date| date.weekday() == weekday)
    } else {
        None
    }
}

/// A named holiday or observance and the rule that places it in each year.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayRule {
    /// Stable identifier, unique within a catalog.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Whether the day is a public (non-working) holiday rather than an observance.
    #[serde(default)]
    pub is_public: bool,
    /// How the date is determined each year.
    pub rule: RuleKind,
}

impl HolidayRule {
    /// Create a rule.
    pub fn new(id: &str, name: &str, is_public: bool, rule: RuleKind) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            is_public,
            rule,
        }
    }

    /// Return the date of the holiday in `year`, if it occurs.
    pub fn resolve(&self, year: i32) -> Option<NaiveDate> {
        self.rule.resolve(year)
    }

    /// Check that the rule parameters are in range.
    pub fn validate(&self) -> Result<(), AlmanacError> {
        if self.id.trim().is_empty() {
            return Err(AlmanacError::InvalidRule {
                id: self.id.clone(),
                reason: "identifier is empty".to_string(),
            });
        }
        match self.rule.invalid_reason() {
            Some(reason) => Err(AlmanacError::InvalidRule {
                id: self.id.clone(),
                reason,
            }),
            None => Ok(()),
        }
    }
}

impl JSON for HolidayRule {}
