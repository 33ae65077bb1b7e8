use chrono::prelude::*;
use chrono::Days;

// Midnight UTC on 1st January 2000 as a Julian Day.
const JD_2000_01_01: f64 = 2451544.5;

// Mean equinox and solstice instants as a Julian Ephemeris Day, a quartic in
// Y = (year - 2000) / 1000. Meeus, Astronomical Algorithms, table 27.B.
const COEFFICIENTS: [(u32, [f64; 5]); 4] = [
    (3, [2451623.80984, 365242.37404, 0.05169, -0.00411, -0.00057]),
    (6, [2451716.56767, 365241.62603, 0.00325, 0.00888, -0.00030]),
    (9, [2451810.21715, 365242.01767, -0.11575, 0.00337, 0.00078]),
    (12, [2451900.05952, 365242.74049, -0.06223, -0.00823, 0.00032]),
];

/// Return the approximate date of the equinox or solstice falling in `month` of `year`.
///
/// `month` must be 3 (March equinox), 6 (June solstice), 9 (September equinox) or 12
/// (December solstice), otherwise `None` is returned. The estimate is truncated to a UTC day
/// and is accurate to within about a day for years 1000 to 3000.
///
/// # Examples
/// ```rust
/// # use almanac::holidays::equinox_or_solstice;
/// # use almanac::calendar::ndate;
/// assert_eq!(equinox_or_solstice(6, 2025), Some(ndate(2025, 6, 21)));
/// assert_eq!(equinox_or_solstice(5, 2025), None);
/// ```
pub fn equinox_or_solstice(month: u32, year: i32) -> Option<NaiveDate> {
    let (_, c) = COEFFICIENTS.iter().find(|(m, _)| *m == month)?;
    let y = (f64::from(year) - 2000.0) / 1000.0;
    let jde = c[0] + y * (c[1] + y * (c[2] + y * (c[3] + y * c[4])));
    let offset = (jde - JD_2000_01_01).floor();
    let epoch = NaiveDate::from_ymd_opt(2000, 1, 1)?;
    let date = if offset < 0.0 {
        epoch.checked_sub_days(Days::new((-offset) as u64))?
    } else {
        epoch.checked_add_days(Days::new(offset as u64))?
    };
    (date.year() == year && date.month() == month).then_some(date)
}

/// Return the approximate day of month of the equinox or solstice in `month` of `year`.
pub fn estimated_day(month: u32, year: i32) -> Option<u32> {
    equinox_or_solstice(month, year).map(|date| date.day())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::ndate;

    #[test]
    fn test_equinox_and_solstice_dates() {
        let options: Vec<(u32, i32, NaiveDate)> = vec![
            (3, 2024, ndate(2024, 3, 20)),
            (6, 2024, ndate(2024, 6, 20)),
            (9, 2024, ndate(2024, 9, 22)),
            (12, 2024, ndate(2024, 12, 21)),
            (3, 2025, ndate(2025, 3, 20)),
            (6, 2025, ndate(2025, 6, 21)),
            (9, 2025, ndate(2025, 9, 22)),
            (12, 2025, ndate(2025, 12, 21)),
        ];
        for option in options {
            assert_eq!(equinox_or_solstice(option.0, option.1), Some(option.2));
        }
    }

    #[test]
    fn test_stays_in_target_month() {
        for year in 1900..2200 {
            for month in [3, 6, 9, 12] {
                let day = estimated_day(month, year).unwrap();
                assert!((19..=24).contains(&day), "{}-{}: {}", year, month, day);
            }
        }
    }

    #[test]
    fn test_dates_outside_the_usual_range() {
        // Late September equinoxes and an early March equinox, as observed in UTC.
        let options: Vec<(u32, i32, NaiveDate)> = vec![
            (9, 1903, ndate(1903, 9, 24)),
            (9, 1931, ndate(1931, 9, 24)),
            (3, 2000, ndate(2000, 3, 20)),
            (12, 2000, ndate(2000, 12, 21)),
            (3, 2096, ndate(2096, 3, 19)),
        ];
        for option in options {
            assert_eq!(equinox_or_solstice(option.0, option.1), Some(option.2));
        }
    }

    #[test]
    fn test_extreme_years_do_not_overflow() {
        for year in [i32::MIN, i32::MIN + 1, i32::MAX] {
            for month in [3, 6, 9, 12] {
                assert_eq!(equinox_or_solstice(month, year), None);
            }
        }
    }

    #[test]
    fn test_invalid_month() {
        for month in [0, 1, 2, 4, 5, 7, 8, 10, 11, 13] {
            assert_eq!(equinox_or_solstice(month, 2025), None);
            assert_eq!(estimated_day(month, 2025), None);
        }
    }
}
