//! Error types for configuration and catalog ingestion.
//!
//! Week and holiday *resolution* never fails; these errors only arise when a
//! [`CalendarConfiguration`](crate::calendar::CalendarConfiguration) or a holiday rule catalog
//! is constructed from untrusted values.

/// Error type for all fallible operations in the almanac crate.
#[derive(Debug, thiserror::Error)]
pub enum AlmanacError {
    /// Returned when a first weekday is outside the canonical 1 (Sunday) to 7 (Saturday) range.
    #[error("first weekday must be in 1..=7 (1 = Sunday), got {value}")]
    InvalidFirstWeekday {
        /// The invalid weekday number.
        value: u8,
    },

    /// Returned when the minimum number of days in the first week is outside 1..=7.
    #[error("minimum days in first week must be in 1..=7, got {value}")]
    InvalidMinimumDays {
        /// The invalid day count.
        value: u8,
    },

    /// Returned when a time zone name is not a known IANA identifier.
    #[error("unknown time zone '{name}'")]
    UnknownTimeZone {
        /// The unrecognised name.
        name: String,
    },

    /// Returned when a holiday rule carries parameters that can never resolve.
    #[error("holiday rule '{id}' is invalid: {reason}")]
    InvalidRule {
        /// Identifier of the offending rule.
        id: String,
        /// Which parameter is out of range.
        reason: String,
    },

    /// Returned when two rules in one catalog share an identifier.
    #[error("holiday rule '{id}' is defined more than once")]
    DuplicateRule {
        /// The repeated identifier.
        id: String,
    },

    /// Returned when a JSON document cannot be parsed.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Returned when a TOML settings document cannot be parsed.
    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
}
