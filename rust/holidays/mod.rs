//! Resolve holidays and observances from a catalog of parametric rules.
//!
//! # Rules
//!
//! A [`HolidayRule`] names a day and carries a [`RuleKind`] which places it in any given year:
//! a fixed date, an offset from Easter Sunday, the first weekday within a day range, the Nth
//! (or last) weekday of a month, or an approximate equinox/solstice. A rule which does not
//! occur in a year (e.g. 29th February) simply resolves to nothing.
//!
//! # Catalog
//!
//! Rules are grouped in a [`HolidayCatalog`]. The built-in catalog is compiled in from a single
//! JSON data file, and hosts can supply their own through [`JSON::from_json`](crate::json::JSON).
//!
//! # Engine
//!
//! The [`HolidayRuleEngine`] answers point and range queries over a catalog.
//!
//! ### Example
//! This example builds an engine with two rules and asks for the holidays of the next 10 days
//! spanning the turn of the year.
//! ```rust
//! # use almanac::holidays::{HolidayRule, HolidayRuleEngine, RuleKind};
//! # use almanac::calendar::ndate;
//! let engine = HolidayRuleEngine::try_from_rules(vec![
//!     HolidayRule::new("nye", "New Year's Eve", false, RuleKind::Fixed { month: 12, day: 31 }),
//!     HolidayRule::new("nyd", "New Year's Day", true, RuleKind::Fixed { month: 1, day: 1 }),
//! ]).unwrap();
//! let upcoming = engine.upcoming_holidays(&ndate(2024, 12, 28), 10);
//! assert_eq!(upcoming[0].date, ndate(2024, 12, 31));
//! assert_eq!(upcoming[1].date, ndate(2025, 1, 1));
//! ```

mod astronomical;
mod catalog;
mod computus;
mod engine;
mod resolved;
mod rule;

pub use crate::holidays::{
    astronomical::{equinox_or_solstice, estimated_day},
    catalog::HolidayCatalog,
    computus::easter_sunday,
    engine::HolidayRuleEngine,
    resolved::ResolvedHoliday,
    rule::{HolidayRule, RuleKind},
};
