//! Structured logging setup for binaries embedding the engine.
//!
//! The library itself only emits `tracing` events; installing a subscriber is left to the host.

use tracing_subscriber::EnvFilter;

/// Map a CLI style verbosity count to a level for the `almanac` target.
///
/// - 0 (none) -> warn
/// - 1 (-v)   -> info
/// - 2 (-vv)  -> debug
/// - 3+ (-vvv)-> trace
pub fn default_filter(verbosity: u8) -> String {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    format!("almanac={level}")
}

/// Initialize tracing to stderr based on a verbosity level.
///
/// `RUST_LOG` overrides the verbosity if set. Calling this more than once is a no-op.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
