use std::path::PathBuf;

use clap::Parser;

/// Show the current week and the holidays of the coming days.
#[derive(Debug, Parser)]
#[command(name = "almanac", version, about = "Week numbers and holidays")]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Number of days of upcoming holidays to list.
    #[arg(short, long, default_value_t = 30)]
    pub days: u32,

    /// Path to a TOML calendar configuration file.
    pub settings: Option<PathBuf>,
}
