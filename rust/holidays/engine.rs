use chrono::prelude::*;
use chrono::Days;
use itertools::Itertools;
use std::sync::Arc;
use tracing::trace;

use crate::holidays::{HolidayCatalog, HolidayRule, ResolvedHoliday};
use crate::json::JSON;
use crate::AlmanacError;

// Window searched by `next_holiday`, long enough to reach every annual rule.
const NEXT_HOLIDAY_WINDOW: u32 = 366;

/// Evaluates a [`HolidayCatalog`] against dates and date ranges.
///
/// The engine holds no mutable state: every query re-evaluates the rules, so it can be shared
/// across threads freely. Cloning is cheap, the catalog is reference counted.
///
/// # Examples
/// ```rust
/// # use almanac::holidays::HolidayRuleEngine;
/// # use almanac::calendar::ndate;
/// let engine = HolidayRuleEngine::default();
/// let names: Vec<String> = engine
///     .holidays_on(&ndate(2025, 6, 21))
///     .into_iter()
///     .map(|h| h.name)
///     .collect();
/// assert_eq!(names, vec!["Midsummer Day", "June Solstice"]);
/// ```
#[derive(Clone, Debug)]
pub struct HolidayRuleEngine {
    catalog: Arc<HolidayCatalog>,
}

impl HolidayRuleEngine {
    /// Create an engine over the given catalog.
    pub fn new(catalog: Arc<HolidayCatalog>) -> Self {
        Self { catalog }
    }

    /// Create an engine from a list of rules, validating them.
    pub fn try_from_rules(rules: Vec<HolidayRule>) -> Result<Self, AlmanacError> {
        Ok(Self::new(Arc::new(HolidayCatalog::try_new(rules)?)))
    }

    /// Create an engine from a JSON catalog document supplied by the host.
    pub fn from_json(json: &str) -> Result<Self, AlmanacError> {
        Ok(Self::new(Arc::new(HolidayCatalog::from_json(json)?)))
    }

    pub fn catalog(&self) -> &HolidayCatalog {
        &self.catalog
    }

    // Resolve every rule for one year, in catalog order.
    fn resolve_year(&self, year: i32) -> impl Iterator<Item = ResolvedHoliday> + '_ {
        self.catalog.iter().filter_map(move |rule| match rule.resolve(year) {
            Some(date) => Some(ResolvedHoliday::from_rule(rule, date)),
            None => {
                trace!(id = %rule.id, year, "holiday rule does not occur");
                None
            }
        })
    }

    /// Return the holidays falling on `date`, public holidays first, then by name.
    pub fn holidays_on(&self, date: &NaiveDate) -> Vec<ResolvedHoliday> {
        self.resolve_year(date.year())
            .filter(|h| h.date == *date)
            .sorted_by(ResolvedHoliday::cmp_within_day)
            .collect()
    }

    /// Whether any holiday falls on `date`.
    pub fn has_holiday(&self, date: &NaiveDate) -> bool {
        self.catalog
            .iter()
            .any(|rule| rule.resolve(date.year()) == Some(*date))
    }

    /// Return the holidays strictly after `from` and at most `within_days` days later, ordered
    /// by date, then public holidays first, then by name.
    ///
    /// # Examples
    /// ```rust
    /// # use almanac::holidays::HolidayRuleEngine;
    /// # use almanac::calendar::ndate;
    /// let engine = HolidayRuleEngine::default();
    /// let upcoming = engine.upcoming_holidays(&ndate(2024, 12, 28), 10);
    /// let ids: Vec<&str> = upcoming.iter().map(|h| h.id.as_str()).collect();
    /// assert_eq!(ids, vec!["new_years_eve", "new_years_day", "epiphany"]);
    /// ```
    pub fn upcoming_holidays(&self, from: &NaiveDate, within_days: u32) -> Vec<ResolvedHoliday> {
        let Some(start) = from.checked_add_days(Days::new(1)) else {
            return vec![];
        };
        // A window running past the last representable date stops there.
        let end = from
            .checked_add_days(Days::new(u64::from(within_days)))
            .unwrap_or(NaiveDate::MAX);
        self.holidays_between(&start, &end)
    }

    /// Return the holidays from `start` to `end` inclusive, ordered by date, then public
    /// holidays first, then by name. Empty if `start` is after `end`.
    pub fn holidays_between(&self, start: &NaiveDate, end: &NaiveDate) -> Vec<ResolvedHoliday> {
        if start > end {
            return vec![];
        }
        (start.year()..=end.year())
            .flat_map(|year| self.resolve_year(year))
            .filter(|h| *start <= h.date && h.date <= *end)
            .sorted_by(ResolvedHoliday::cmp_by_date)
            .collect()
    }

    /// Return every holiday of `year`, ordered by date, then public holidays first, then by name.
    pub fn holidays_in_year(&self, year: i32) -> Vec<ResolvedHoliday> {
        self.resolve_year(year)
            .sorted_by(ResolvedHoliday::cmp_by_date)
            .collect()
    }

    /// Return the first holiday strictly after `from`, if one occurs within a year.
    pub fn next_holiday(&self, from: &NaiveDate) -> Option<ResolvedHoliday> {
        self.upcoming_holidays(from, NEXT_HOLIDAY_WINDOW)
            .into_iter()
            .next()
    }

    /// Return the first public holiday strictly after `from`, if one occurs within a year.
    pub fn next_public_holiday(&self, from: &NaiveDate) -> Option<ResolvedHoliday> {
        self.upcoming_holidays(from, NEXT_HOLIDAY_WINDOW)
            .into_iter()
            .find(|h| h.is_public)
    }
}

impl Default for HolidayRuleEngine {
    /// An engine over the built-in catalog.
    fn default() -> Self {
        Self::new(HolidayCatalog::builtin())
    }
}
