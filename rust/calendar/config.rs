use chrono::Weekday;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::calendar::weekday::{weekday_from_number, weekday_to_number};
use crate::json::JSON;
use crate::AlmanacError;

/// The week-numbering convention and locality under which weeks are resolved.
///
/// A configuration is an immutable value. Hosts switch conventions by building a new one and
/// handing it to [`WeekResolver::reconfigure`](crate::calendar::WeekResolver::reconfigure).
///
/// The [`Default`] is ISO-8601: weeks start on Monday and the first week of a year is the
/// first one holding at least 4 days of that year.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ConfigurationDataModel", into = "ConfigurationDataModel")]
pub struct CalendarConfiguration {
    first_weekday: Weekday,
    minimum_days_in_first_week: u8,
    time_zone: Tz,
    locale: String,
}

// Serialized shape, shared by the JSON and TOML paths. Every key is optional.
#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigurationDataModel {
    #[serde(default = "default_first_weekday")]
    first_weekday: u8,
    #[serde(default = "default_minimum_days")]
    minimum_days_in_first_week: u8,
    #[serde(default = "default_time_zone")]
    time_zone: String,
    #[serde(default = "default_locale")]
    locale: String,
}

fn default_first_weekday() -> u8 {
    2
}
fn default_minimum_days() -> u8 {
    4
}
fn default_time_zone() -> String {
    "UTC".to_string()
}
fn default_locale() -> String {
    "en_US".to_string()
}

impl TryFrom<ConfigurationDataModel> for CalendarConfiguration {
    type Error = AlmanacError;

    fn try_from(model: ConfigurationDataModel) -> Result<Self, Self::Error> {
        let time_zone: Tz = model
            .time_zone
            .parse()
            .map_err(|_| AlmanacError::UnknownTimeZone {
                name: model.time_zone.clone(),
            })?;
        Self::try_new(
            model.first_weekday,
            model.minimum_days_in_first_week,
            time_zone,
            &model.locale,
        )
    }
}

impl From<CalendarConfiguration> for ConfigurationDataModel {
    fn from(config: CalendarConfiguration) -> Self {
        Self {
            first_weekday: weekday_to_number(config.first_weekday),
            minimum_days_in_first_week: config.minimum_days_in_first_week,
            time_zone: config.time_zone.name().to_string(),
            locale: config.locale,
        }
    }
}

impl CalendarConfiguration {
    /// Create a configuration.
    ///
    /// `first_weekday` uses the canonical numbering 1=Sun,.., 7=Sat. `minimum_days_in_first_week`
    /// is the number of days of a new year the opening week must contain to be counted as
    /// week 1 of that year (ISO-8601 uses 4).
    ///
    /// # Examples
    /// ```rust
    /// # use almanac::calendar::CalendarConfiguration;
    /// // North American convention: Sunday start, week 1 contains 1st January.
    /// let config = CalendarConfiguration::try_new(1, 1, chrono_tz::America::New_York, "en_US");
    /// assert!(config.is_ok());
    /// ```
    pub fn try_new(
        first_weekday: u8,
        minimum_days_in_first_week: u8,
        time_zone: Tz,
        locale: &str,
    ) -> Result<Self, AlmanacError> {
        let first_weekday = weekday_from_number(first_weekday).ok_or(
            AlmanacError::InvalidFirstWeekday {
                value: first_weekday,
            },
        )?;
        if !(1..=7).contains(&minimum_days_in_first_week) {
            return Err(AlmanacError::InvalidMinimumDays {
                value: minimum_days_in_first_week,
            });
        }
        Ok(Self {
            first_weekday,
            minimum_days_in_first_week,
            time_zone,
            locale: locale.to_string(),
        })
    }

    /// Create a configuration from a TOML settings document.
    ///
    /// Missing keys fall back to the ISO-8601 defaults; unknown keys are rejected.
    ///
    /// ```toml
    /// first_weekday = 2
    /// minimum_days_in_first_week = 4
    /// time_zone = "Europe/Stockholm"
    /// locale = "sv_SE"
    /// ```
    pub fn from_toml(toml_str: &str) -> Result<Self, AlmanacError> {
        let model: ConfigurationDataModel = toml::from_str(toml_str)?;
        Self::try_from(model)
    }

    /// Return a copy with a different first weekday (1=Sun,.., 7=Sat).
    pub fn with_first_weekday(&self, first_weekday: u8) -> Result<Self, AlmanacError> {
        Self::try_new(
            first_weekday,
            self.minimum_days_in_first_week,
            self.time_zone,
            &self.locale,
        )
    }

    /// Return a copy with a different time zone.
    pub fn with_time_zone(&self, time_zone: Tz) -> Self {
        Self {
            time_zone,
            ..self.clone()
        }
    }

    /// The weekday on which every week starts.
    pub fn first_weekday(&self) -> Weekday {
        self.first_weekday
    }

    /// The minimum number of days of a year contained in its first week.
    pub fn minimum_days_in_first_week(&self) -> u8 {
        self.minimum_days_in_first_week
    }

    /// The time zone in which "today" and "now" are evaluated.
    pub fn time_zone(&self) -> Tz {
        self.time_zone
    }

    /// The locale tag, e.g. `"sv_SE"`.
    pub fn locale(&self) -> &str {
        &self.locale
    }
}

impl Default for CalendarConfiguration {
    fn default() -> Self {
        Self {
            first_weekday: Weekday::Mon,
            minimum_days_in_first_week: 4,
            time_zone: Tz::UTC,
            locale: default_locale(),
        }
    }
}

impl JSON for CalendarConfiguration {}

// UNIT TESTS
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_iso() {
        let config = CalendarConfiguration::default();
        assert_eq!(config.first_weekday(), Weekday::Mon);
        assert_eq!(config.minimum_days_in_first_week(), 4);
        assert_eq!(config.time_zone(), Tz::UTC);
    }

    #[test]
    fn test_try_new_rejects_out_of_range() {
        assert!(matches!(
            CalendarConfiguration::try_new(0, 4, Tz::UTC, "en_US"),
            Err(AlmanacError::InvalidFirstWeekday { value: 0 })
        ));
        assert!(matches!(
            CalendarConfiguration::try_new(2, 8, Tz::UTC, "en_US"),
            Err(AlmanacError::InvalidMinimumDays { value: 8 })
        ));
    }

    #[test]
    fn test_from_toml() {
        let config = CalendarConfiguration::from_toml(
            r#"
            first_weekday = 1
            minimum_days_in_first_week = 1
            time_zone = "America/New_York"
            "#,
        )
        .unwrap();
        assert_eq!(config.first_weekday(), Weekday::Sun);
        assert_eq!(config.minimum_days_in_first_week(), 1);
        assert_eq!(config.time_zone(), chrono_tz::America::New_York);
        assert_eq!(config.locale(), "en_US");
    }

    #[test]
    fn test_from_toml_empty_is_default() {
        let config = CalendarConfiguration::from_toml("").unwrap();
        assert_eq!(config, CalendarConfiguration::default());
    }

    #[test]
    fn test_from_toml_errors() {
        let result = CalendarConfiguration::from_toml("time_zone = \"Nowhere/Special\"");
        assert!(matches!(result, Err(AlmanacError::UnknownTimeZone { .. })));

        let result = CalendarConfiguration::from_toml("first_day = 2");
        assert!(matches!(result, Err(AlmanacError::Toml(_))));
    }

    #[test]
    fn test_config_json() {
        let config = CalendarConfiguration::try_new(1, 1, chrono_tz::Europe::Stockholm, "sv_SE")
            .unwrap();
        let js = config.to_json().unwrap();
        let config2 = CalendarConfiguration::from_json(&js).unwrap();
        assert_eq!(config, config2);
    }

    #[test]
    fn test_config_json_validates() {
        let result = CalendarConfiguration::from_json(r#"{"first_weekday": 9}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_with_first_weekday() {
        let config = CalendarConfiguration::default().with_first_weekday(1).unwrap();
        assert_eq!(config.first_weekday(), Weekday::Sun);
        assert_eq!(config.minimum_days_in_first_week(), 4);
        assert!(CalendarConfiguration::default().with_first_weekday(0).is_err());
    }
}
