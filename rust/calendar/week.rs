//! Pure week-of-year arithmetic.
//!
//! A week is a run of 7 days starting on the configured first weekday. The week belongs to
//! year *Y* if at least `minimum_days_in_first_week` of its days fall in *Y*. With a Monday
//! start and 4 minimum days this is the ISO-8601 rule (the week containing Thursday).

use chrono::prelude::*;
use chrono::Days;

use crate::calendar::weekday::day_index;
use crate::calendar::CalendarConfiguration;

/// Return the first day of the week containing `date`.
pub(crate) fn week_start(date: &NaiveDate, first: Weekday) -> Option<NaiveDate> {
    date.checked_sub_days(Days::new(day_index(date, first).into()))
}

/// Return the first day of week 1 of `week_year`.
pub(crate) fn first_week_start(week_year: i32, config: &CalendarConfiguration) -> Option<NaiveDate> {
    let jan1 = NaiveDate::from_ymd_opt(week_year, 1, 1)?;
    let start = week_start(&jan1, config.first_weekday())?;
    let days_in_year = 7 - day_index(&jan1, config.first_weekday());
    if days_in_year >= u32::from(config.minimum_days_in_first_week()) {
        Some(start)
    } else {
        start.checked_add_days(Days::new(7))
    }
}

/// Return the `(week_number, week_year)` of `date`.
///
/// # Examples
/// ```rust
/// # use almanac::calendar::{week_number, CalendarConfiguration, ndate};
/// let iso = CalendarConfiguration::default();
/// // Tuesday 31st December 2024 is in week 1 of 2025.
/// assert_eq!(week_number(&ndate(2024, 12, 31), &iso), Some((1, 2025)));
/// // Friday 1st January 2021 is in week 53 of 2020.
/// assert_eq!(week_number(&ndate(2021, 1, 1), &iso), Some((53, 2020)));
/// ```
pub fn week_number(date: &NaiveDate, config: &CalendarConfiguration) -> Option<(u32, i32)> {
    let year = date.year();
    if let Some(next) = first_week_start(year + 1, config) {
        if *date >= next {
            return Some((1, year + 1));
        }
    }
    let start = week_start(date, config.first_weekday())?;
    let (anchor, week_year) = match first_week_start(year, config) {
        Some(this) if *date >= this => (this, year),
        _ => (first_week_start(year - 1, config)?, year - 1),
    };
    let weeks = (start - anchor).num_days() / 7;
    Some((u32::try_from(weeks).ok()? + 1, week_year))
}

/// Return the number of weeks, 52 or 53, belonging to `week_year`.
pub(crate) fn weeks_in_year(week_year: i32, config: &CalendarConfiguration) -> Option<u32> {
    let this = first_week_start(week_year, config)?;
    let next = first_week_start(week_year.checked_add(1)?, config)?;
    u32::try_from((next - this).num_days() / 7).ok()
}

/// Return the first day of week `week_number` of `week_year`, if that week exists.
pub(crate) fn start_of_week(
    week_number: u32,
    week_year: i32,
    config: &CalendarConfiguration,
) -> Option<NaiveDate> {
    if week_number == 0 || week_number > weeks_in_year(week_year, config)? {
        return None;
    }
    first_week_start(week_year, config)?.checked_add_days(Days::new(7 * u64::from(week_number - 1)))
}
