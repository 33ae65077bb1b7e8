//! This is the documentation for almanac
//!
//! *almanac* computes the two temporal facts a consumer calendar displays next to a date:
//!
//! - the week number and week boundaries under a configurable week-numbering convention, see
//!   [`calendar`];
//! - the holidays and observances falling on or near the date, resolved from a catalog of
//!   parametric rules, see [`holidays`].
//!
//! Both are plain values constructed by the host. An application and a sandboxed display
//! extension each build their own [`calendar::WeekResolver`] and [`holidays::HolidayRuleEngine`]
//! and converge on identical results by sharing the same [`calendar::CalendarConfiguration`]
//! and the same compiled-in catalog.
//!
//! ```rust
//! # use almanac::calendar::{WeekResolver, ndate};
//! # use almanac::holidays::HolidayRuleEngine;
//! let resolver = WeekResolver::default();
//! let engine = HolidayRuleEngine::default();
//!
//! let midsummer = ndate(2025, 6, 21);
//! assert_eq!(resolver.week_descriptor(midsummer).week_number, 25);
//! assert!(engine.has_holiday(&midsummer));
//! ```


pub mod json;

mod error;
pub use crate::error::AlmanacError;

pub mod calendar;
pub mod holidays;
pub mod logging;
