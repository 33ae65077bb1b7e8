mod cli;

use std::fs;
use std::process::ExitCode;

use almanac::calendar::{CalendarConfiguration, WeekResolver};
use almanac::holidays::HolidayRuleEngine;
use almanac::logging;
use clap::Parser;

use crate::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = match &cli.settings {
        None => CalendarConfiguration::default(),
        Some(path) => match fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|s| CalendarConfiguration::from_toml(&s).map_err(|e| e.to_string()))
        {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: cannot load settings from {}: {e}", path.display());
                return ExitCode::FAILURE;
            }
        },
    };

    let resolver = WeekResolver::new(config);
    let engine = HolidayRuleEngine::default();
    let today = resolver.today();
    let week = resolver.week_descriptor(today);

    println!(
        "Week {} of {} ({}), {} days remaining, {:.0}% elapsed",
        week.week_number,
        week.week_year,
        week.display_range,
        week.days_remaining,
        resolver.week_progress() * 100.0
    );
    for holiday in engine.holidays_on(&today) {
        println!("Today: {}", holiday.name);
    }
    for holiday in engine.upcoming_holidays(&today, cli.days) {
        println!(
            "{:>3} days  {}  {}{}",
            holiday.days_until(&today),
            holiday.date.format("%a %b %-d"),
            holiday.name,
            if holiday.is_public { " *" } else { "" }
        );
    }
    ExitCode::SUCCESS
}
