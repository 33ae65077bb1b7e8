use chrono::prelude::*;

/// Create a `NaiveDate`.
///
/// Panics if date values are invalid.
pub fn ndate(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("`year`, `month` `day` are invalid.")
}

/// Convert a canonical weekday number (1=Sun,.., 7=Sat) to a [`Weekday`].
///
/// Returns `None` outside 1..=7.
pub fn weekday_from_number(number: u8) -> Option<Weekday> {
    match number {
        1..=7 => Weekday::try_from((number + 5) % 7).ok(),
        _ => None,
    }
}

/// Convert a [`Weekday`] to its canonical number (1=Sun,.., 7=Sat).
pub fn weekday_to_number(weekday: Weekday) -> u8 {
    weekday.number_from_sunday() as u8
}

/// Number of days `date` lies after the most recent `first` weekday, in 0..=6.
pub(crate) fn day_index(date: &NaiveDate, first: Weekday) -> u32 {
    (date.weekday().num_days_from_monday() + 7 - first.num_days_from_monday()) % 7
}

/// Number of days in `month` of `year`, or `None` if the month is invalid.
pub(crate) fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let month_obj = Month::try_from(u8::try_from(month).ok()?).ok()?;
    month_obj.num_days(year).map(u32::from)
}
