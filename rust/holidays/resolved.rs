use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::holidays::HolidayRule;
use crate::json::JSON;

/// A holiday placed on a concrete date.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedHoliday {
    /// Identifier of the rule that produced the holiday.
    pub id: String,
    pub date: NaiveDate,
    pub name: String,
    pub is_public: bool,
}

impl ResolvedHoliday {
    pub(crate) fn from_rule(rule: &HolidayRule, date: NaiveDate) -> Self {
        Self {
            id: rule.id.clone(),
            date,
            name: rule.name.clone(),
            is_public: rule.is_public,
        }
    }

    /// Number of days from `from` until the holiday; negative if it has passed.
    pub fn days_until(&self, from: &NaiveDate) -> i64 {
        (self.date - *from).num_days()
    }

    /// Order for holidays sharing a day: public holidays first, then by name.
    pub fn cmp_within_day(&self, other: &Self) -> Ordering {
        other
            .is_public
            .cmp(&self.is_public)
            .then_with(|| self.name.cmp(&other.name))
    }

    /// Order across days: by date, then as [`cmp_within_day`](Self::cmp_within_day).
    pub fn cmp_by_date(&self, other: &Self) -> Ordering {
        self.date
            .cmp(&other.date)
            .then_with(|| self.cmp_within_day(other))
    }
}

impl JSON for ResolvedHoliday {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::ndate;

    fn holiday(date: NaiveDate, name: &str, is_public: bool) -> ResolvedHoliday {
        ResolvedHoliday {
            id: name.to_lowercase(),
            date,
            name: name.to_string(),
            is_public,
        }
    }

    #[test]
    fn test_ordering() {
        let mut holidays = vec![
            holiday(ndate(2025, 6, 21), "June Solstice", false),
            holiday(ndate(2025, 6, 20), "Midsummer Eve", false),
            holiday(ndate(2025, 6, 21), "Midsummer Day", true),
            holiday(ndate(2025, 6, 21), "Alpha Observance", false),
        ];
        holidays.sort_by(ResolvedHoliday::cmp_by_date);
        let names: Vec<&str> = holidays.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Midsummer Eve", "Midsummer Day", "Alpha Observance", "June Solstice"]
        );
    }

    #[test]
    fn test_days_until() {
        let h = holiday(ndate(2025, 12, 24), "Christmas Eve", false);
        assert_eq!(h.days_until(&ndate(2025, 12, 1)), 23);
        assert_eq!(h.days_until(&ndate(2025, 12, 24)), 0);
        assert_eq!(h.days_until(&ndate(2025, 12, 26)), -2);
    }
}
