//! Resolve dates to week numbers and week boundaries under a configurable convention.
//!
//! # Configuration
//!
//! A [`CalendarConfiguration`] fixes the first weekday and the minimum number of days the first
//! week of a year must contain. The default is ISO-8601 (Monday, 4 days).
//!
//! # Resolution
//!
//! The [`WeekResolver`] turns a date into a [`WeekDescriptor`] and memoizes week boundaries.
//! Reconfiguring the resolver clears its cache, so week boundaries computed under a different
//! convention are never returned.
//!
//! ### Example
//! This example resolves New Year's Eve 2024 under ISO-8601 and under the North American
//! convention (Sunday start, 1st January always in week 1).
//! ```rust
//! # use almanac::calendar::{CalendarConfiguration, WeekResolver, ndate};
//! let resolver = WeekResolver::default();
//! let week = resolver.week_descriptor(ndate(2024, 12, 31));
//! assert_eq!((week.week_number, week.week_year), (1, 2025));
//!
//! let us = CalendarConfiguration::try_new(1, 1, chrono_tz::America::Chicago, "en_US").unwrap();
//! resolver.reconfigure(us);
//! let week = resolver.week_descriptor(ndate(2024, 12, 31));
//! assert_eq!((week.week_number, week.week_year), (1, 2025));
//! assert_eq!(week.start_date, ndate(2024, 12, 29));
//! ```

mod config;
mod descriptor;
mod resolver;
mod week;
mod weekday;

pub use crate::calendar::{
    config::CalendarConfiguration,
    descriptor::WeekDescriptor,
    resolver::WeekResolver,
    week::week_number,
    weekday::{ndate, weekday_from_number, weekday_to_number},
};
pub(crate) use crate::calendar::weekday::days_in_month;
