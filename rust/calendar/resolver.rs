use chrono::prelude::*;
use chrono::Days;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, trace};

use crate::calendar::descriptor::display_range;
use crate::calendar::week::{start_of_week, week_number, week_start, weeks_in_year};
use crate::calendar::weekday::day_index;
use crate::calendar::{CalendarConfiguration, WeekDescriptor};

const MINUTES_PER_WEEK: f64 = 7.0 * 24.0 * 60.0;

// The parts of a descriptor that do not depend on "now".
#[derive(Clone, Debug)]
struct WeekBounds {
    week_number: u32,
    week_year: i32,
    start_date: NaiveDate,
    end_date: NaiveDate,
    display_range: String,
}

impl WeekBounds {
    fn new(week_number: u32, week_year: i32, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            week_number,
            week_year,
            start_date,
            end_date,
            display_range: display_range(&start_date, &end_date),
        }
    }

    // Week at the edge of the representable date range; clamped rather than failing.
    fn clamped(date: &NaiveDate, config: &CalendarConfiguration) -> Self {
        let start = week_start(date, config.first_weekday()).unwrap_or(NaiveDate::MIN);
        let end = start.checked_add_days(Days::new(6)).unwrap_or(NaiveDate::MAX);
        let (number, year) = week_number(date, config).unwrap_or((1, date.year()));
        Self::new(number, year, start, end)
    }

    fn describe(&self, today: &NaiveDate) -> WeekDescriptor {
        let is_current_week = self.start_date <= *today && *today <= self.end_date;
        let days_remaining = if is_current_week {
            u32::try_from((self.end_date - *today).num_days()).unwrap_or(0)
        } else {
            0
        };
        WeekDescriptor {
            week_number: self.week_number,
            week_year: self.week_year,
            start_date: self.start_date,
            end_date: self.end_date,
            display_range: self.display_range.clone(),
            days_remaining,
            is_current_week,
        }
    }
}

struct ResolverState {
    config: Arc<CalendarConfiguration>,
    // Incremented on every reconfigure; a computed week is only cached under the generation
    // whose configuration produced it.
    generation: u64,
    cache: HashMap<(i32, u32), WeekBounds>,
}

/// Resolves dates to weeks under a [`CalendarConfiguration`].
///
/// The resolver memoizes week boundaries by `(week_year, week_number)`. A single mutex guards
/// the active configuration and the cache together, so [`reconfigure`](Self::reconfigure)
/// clears the cache atomically with respect to concurrent readers. The resolver is `Send +
/// Sync` and can be shared behind an `Arc`.
///
/// # Examples
/// ```rust
/// # use almanac::calendar::{WeekResolver, ndate};
/// let resolver = WeekResolver::default();
/// let week = resolver.week_descriptor(ndate(2025, 1, 1));
/// assert_eq!((week.week_number, week.week_year), (1, 2025));
/// assert_eq!(week.start_date, ndate(2024, 12, 30));
/// assert_eq!(week.end_date, ndate(2025, 1, 5));
/// ```
pub struct WeekResolver {
    state: Mutex<ResolverState>,
}

impl WeekResolver {
    /// Create a resolver with an empty cache.
    pub fn new(config: CalendarConfiguration) -> Self {
        Self {
            state: Mutex::new(ResolverState {
                config: Arc::new(config),
                generation: 0,
                cache: HashMap::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ResolverState> {
        // The guarded state holds no invariant a panicking reader could break.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn snapshot(&self) -> (Arc<CalendarConfiguration>, u64) {
        let state = self.lock();
        (state.config.clone(), state.generation)
    }

    /// Replace the active configuration and clear every cached week.
    pub fn reconfigure(&self, config: CalendarConfiguration) {
        let mut state = self.lock();
        debug!(
            first_weekday = ?config.first_weekday(),
            minimum_days = config.minimum_days_in_first_week(),
            time_zone = %config.time_zone(),
            evicted = state.cache.len(),
            "reconfiguring week resolver"
        );
        state.config = Arc::new(config);
        state.generation += 1;
        state.cache.clear();
    }

    /// Return a copy of the active configuration.
    pub fn configuration(&self) -> CalendarConfiguration {
        (*self.snapshot().0).clone()
    }

    /// Return the current instant in the configured time zone.
    pub fn now_in_zone(&self) -> DateTime<chrono_tz::Tz> {
        Utc::now().with_timezone(&self.snapshot().0.time_zone())
    }

    /// Return today's date in the configured time zone.
    pub fn today(&self) -> NaiveDate {
        self.now_in_zone().date_naive()
    }

    /// Return the [`WeekDescriptor`] for the week containing `date`, relative to the current time.
    pub fn week_descriptor(&self, date: NaiveDate) -> WeekDescriptor {
        self.week_descriptor_at(date, Utc::now())
    }

    /// Return the [`WeekDescriptor`] for the week containing `date`, with `now` deciding the
    /// `is_current_week` and `days_remaining` fields.
    pub fn week_descriptor_at(&self, date: NaiveDate, now: DateTime<Utc>) -> WeekDescriptor {
        let (config, generation) = self.snapshot();
        let today = now.with_timezone(&config.time_zone()).date_naive();

        let Some(key) = week_number(&date, &config).map(|(n, y)| (y, n)) else {
            return WeekBounds::clamped(&date, &config).describe(&today);
        };

        {
            let state = self.lock();
            if state.generation == generation {
                if let Some(bounds) = state.cache.get(&key) {
                    trace!(week_year = key.0, week_number = key.1, "week cache hit");
                    return bounds.describe(&today);
                }
            }
        }

        let bounds = match start_of_week(key.1, key.0, &config)
            .and_then(|start| Some((start, start.checked_add_days(Days::new(6))?)))
        {
            Some((start, end)) => WeekBounds::new(key.1, key.0, start, end),
            None => return WeekBounds::clamped(&date, &config).describe(&today),
        };
        let descriptor = bounds.describe(&today);

        let mut state = self.lock();
        if state.generation == generation {
            trace!(week_year = key.0, week_number = key.1, "week cache miss");
            state.cache.insert(key, bounds);
        }
        descriptor
    }

    /// Whether `date` falls in the current week.
    pub fn is_in_current_week(&self, date: NaiveDate) -> bool {
        self.is_in_current_week_at(date, Utc::now())
    }

    /// Whether `date` falls in the week containing `now`.
    pub fn is_in_current_week_at(&self, date: NaiveDate, now: DateTime<Utc>) -> bool {
        self.week_descriptor_at(date, now).is_current_week
    }

    /// Return the 7 dates of week `week_number` of `week_year`, starting on the first weekday.
    ///
    /// Returns an empty vector if the week does not exist, e.g. week 53 of a 52 week year.
    pub fn dates_in_week(&self, week_number: u32, week_year: i32) -> Vec<NaiveDate> {
        let (config, _) = self.snapshot();
        match start_of_week(week_number, week_year, &config) {
            Some(start) => {
                let dates: Vec<NaiveDate> = start.iter_days().take(7).collect();
                if dates.len() == 7 {
                    dates
                } else {
                    vec![]
                }
            }
            None => vec![],
        }
    }

    /// Return the number of weeks in `week_year`, falling back to 52 if it cannot be determined.
    pub fn weeks_in_year(&self, week_year: i32) -> u32 {
        let (config, _) = self.snapshot();
        weeks_in_year(week_year, &config).unwrap_or(52)
    }

    /// Return the fraction, 0.0 to 1.0, of the current week that has elapsed.
    pub fn week_progress(&self) -> f64 {
        self.week_progress_at(Utc::now())
    }

    /// Return the fraction, 0.0 to 1.0, of the week containing `now` that has elapsed at `now`.
    ///
    /// Measured in elapsed minutes since local midnight on the first weekday, over the length
    /// of that week in the configured time zone, which differs from 7 days when the week
    /// contains a daylight saving transition.
    pub fn week_progress_at(&self, now: DateTime<Utc>) -> f64 {
        let (config, _) = self.snapshot();
        let tz = config.time_zone();
        let today = now.with_timezone(&tz).date_naive();
        let bounds = week_start(&today, config.first_weekday()).and_then(|start| {
            let next = start.checked_add_days(Days::new(7))?;
            Some((start_of_day(&tz, start)?, start_of_day(&tz, next)?))
        });
        match bounds {
            Some((start, next)) => {
                let total = (next - start).num_minutes();
                if total <= 0 {
                    return 0.0;
                }
                let elapsed = (now - start).num_minutes();
                (elapsed as f64 / total as f64).clamp(0.0, 1.0)
            }
            // Edge of the date range: fall back to the local wall clock.
            None => {
                let local = now.with_timezone(&tz);
                let index = day_index(&today, config.first_weekday());
                let minutes = index * 24 * 60 + local.hour() * 60 + local.minute();
                (f64::from(minutes) / MINUTES_PER_WEEK).clamp(0.0, 1.0)
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn cached_weeks(&self) -> usize {
        self.lock().cache.len()
    }
}

impl Default for WeekResolver {
    fn default() -> Self {
        Self::new(CalendarConfiguration::default())
    }
}

// The first instant of `date` in `tz`. Midnight may fall in a daylight saving gap, in which
// case the day starts at the first local hour that exists.
fn start_of_day(tz: &chrono_tz::Tz, date: NaiveDate) -> Option<DateTime<Utc>> {
    (0..24).find_map(|hour| {
        tz.from_local_datetime(&date.and_hms_opt(hour, 0, 0)?)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
    })
}

// UNIT TESTS
#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::ndate;

    fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, hour, minute, 0).unwrap()
    }

    #[test]
    fn test_descriptor_invariants() {
        let configs = vec![
            CalendarConfiguration::default(),
            CalendarConfiguration::try_new(1, 1, chrono_tz::UTC, "en_US").unwrap(),
            CalendarConfiguration::try_new(7, 3, chrono_tz::UTC, "ar_SA").unwrap(),
        ];
        let now = utc(2025, 3, 1, 12, 0);
        for config in configs {
            let first = config.first_weekday();
            let resolver = WeekResolver::new(config);
            for date in ndate(2019, 12, 20).iter_days().take(800) {
                let week = resolver.week_descriptor_at(date, now);
                assert_eq!(week.end_date, week.start_date + Days::new(6));
                assert_eq!(week.start_date.weekday(), first);
                assert!(week.contains(&date));
                assert!((1..=53).contains(&week.week_number));
                assert!(resolver
                    .dates_in_week(week.week_number, week.week_year)
                    .contains(&date));
            }
        }
    }

    #[test]
    fn test_current_week_fields() {
        let resolver = WeekResolver::default();
        // Wednesday 15th January 2025.
        let now = utc(2025, 1, 15, 9, 30);
        let week = resolver.week_descriptor_at(ndate(2025, 1, 13), now);
        assert!(week.is_current_week);
        assert_eq!(week.days_remaining, 4);
        assert_eq!(week.display_range, "Jan 13 – Jan 19, 2025");

        let other = resolver.week_descriptor_at(ndate(2025, 1, 20), now);
        assert!(!other.is_current_week);
        assert_eq!(other.days_remaining, 0);

        assert!(resolver.is_in_current_week_at(ndate(2025, 1, 19), now));
        assert!(!resolver.is_in_current_week_at(ndate(2025, 1, 12), now));
    }

    #[test]
    fn test_current_week_uses_time_zone() {
        let tokyo = CalendarConfiguration::default().with_time_zone(chrono_tz::Asia::Tokyo);
        let resolver = WeekResolver::new(tokyo);
        // Sunday 19th January 2025 20:00 UTC is already Monday 20th in Tokyo.
        let now = utc(2025, 1, 19, 20, 0);
        assert!(resolver.is_in_current_week_at(ndate(2025, 1, 20), now));
        assert!(!resolver.is_in_current_week_at(ndate(2025, 1, 19), now));
    }

    #[test]
    fn test_cache_is_populated_and_reused() {
        let resolver = WeekResolver::default();
        let now = utc(2025, 1, 1, 0, 0);
        let _ = resolver.week_descriptor_at(ndate(2025, 1, 6), now);
        let _ = resolver.week_descriptor_at(ndate(2025, 1, 7), now);
        let _ = resolver.week_descriptor_at(ndate(2025, 1, 12), now);
        assert_eq!(resolver.cached_weeks(), 1);
        let _ = resolver.week_descriptor_at(ndate(2025, 1, 13), now);
        assert_eq!(resolver.cached_weeks(), 2);
    }

    #[test]
    fn test_reconfigure_invalidates_cache() {
        let resolver = WeekResolver::default();
        let now = utc(2025, 1, 1, 0, 0);
        // Wednesday 8th January 2025
        let before = resolver.week_descriptor_at(ndate(2025, 1, 8), now);
        assert_eq!(before.start_date, ndate(2025, 1, 6));
        assert_eq!(resolver.cached_weeks(), 1);

        let sunday_start = resolver.configuration().with_first_weekday(1).unwrap();
        resolver.reconfigure(sunday_start);
        assert_eq!(resolver.cached_weeks(), 0);

        let after = resolver.week_descriptor_at(ndate(2025, 1, 8), now);
        assert_eq!(after.start_date, ndate(2025, 1, 5));
        assert_eq!(after.start_date.weekday(), Weekday::Sun);
    }

    #[test]
    fn test_dates_in_week() {
        let resolver = WeekResolver::default();
        let dates = resolver.dates_in_week(1, 2025);
        assert_eq!(dates.len(), 7);
        assert_eq!(dates[0], ndate(2024, 12, 30));
        assert_eq!(dates[6], ndate(2025, 1, 5));

        assert_eq!(resolver.dates_in_week(53, 2020).len(), 7);
        assert!(resolver.dates_in_week(53, 2023).is_empty());
        assert!(resolver.dates_in_week(0, 2023).is_empty());
        assert!(resolver.dates_in_week(1, i32::MAX).is_empty());
    }

    #[test]
    fn test_weeks_in_year() {
        let resolver = WeekResolver::default();
        assert_eq!(resolver.weeks_in_year(2020), 53);
        assert_eq!(resolver.weeks_in_year(2023), 52);
        assert_eq!(resolver.weeks_in_year(i32::MAX), 52);
    }

    #[test]
    fn test_week_progress() {
        let resolver = WeekResolver::default();
        // Monday 13th January 2025 00:00 is the start of an ISO week.
        assert_eq!(resolver.week_progress_at(utc(2025, 1, 13, 0, 0)), 0.0);
        // Thursday 12:00 is exactly half way.
        assert_eq!(resolver.week_progress_at(utc(2025, 1, 16, 12, 0)), 0.5);
        let end = resolver.week_progress_at(utc(2025, 1, 19, 23, 59));
        assert!(end > 0.99 && end < 1.0);

        let sunday_start = resolver.configuration().with_first_weekday(1).unwrap();
        resolver.reconfigure(sunday_start);
        assert_eq!(resolver.week_progress_at(utc(2025, 1, 19, 0, 0)), 0.0);
    }

    #[test]
    fn test_week_progress_across_daylight_saving() {
        let stockholm =
            CalendarConfiguration::default().with_time_zone(chrono_tz::Europe::Stockholm);
        let resolver = WeekResolver::new(stockholm);

        // Clocks go forward on Sunday 30th March 2025: the week runs from Sunday 23rd 23:00
        // UTC to Sunday 30th 22:00 UTC, 10020 minutes.
        assert_eq!(resolver.week_progress_at(utc(2025, 3, 23, 23, 0)), 0.0);
        let progress = resolver.week_progress_at(utc(2025, 3, 30, 10, 0));
        assert!((progress - 9300.0 / 10020.0).abs() < 1e-12, "{}", progress);
        let end = resolver.week_progress_at(utc(2025, 3, 30, 21, 59));
        assert!((end - 10019.0 / 10020.0).abs() < 1e-12, "{}", end);

        // Clocks go back on Sunday 26th October 2025: the week lasts 10140 minutes.
        assert_eq!(resolver.week_progress_at(utc(2025, 10, 19, 22, 0)), 0.0);
        let end = resolver.week_progress_at(utc(2025, 10, 26, 22, 59));
        assert!((end - 10139.0 / 10140.0).abs() < 1e-12, "{}", end);
    }

    #[test]
    fn test_start_of_day_in_midnight_gap() {
        // Santiago moved its clocks forward at midnight on 8th September 2024.
        let tz = chrono_tz::America::Santiago;
        let start = start_of_day(&tz, ndate(2024, 9, 8)).unwrap();
        assert_eq!(start, utc(2024, 9, 8, 4, 0));
        assert_eq!(start.with_timezone(&tz).hour(), 1);
    }

    #[test]
    fn test_extreme_dates_do_not_panic() {
        let resolver = WeekResolver::default();
        let now = utc(2025, 1, 1, 0, 0);
        let week = resolver.week_descriptor_at(NaiveDate::MAX, now);
        assert!(week.contains(&NaiveDate::MAX) || week.end_date == NaiveDate::MAX);
        let week = resolver.week_descriptor_at(NaiveDate::MIN, now);
        assert!(week.start_date <= NaiveDate::MIN + Days::new(6));
    }
}
