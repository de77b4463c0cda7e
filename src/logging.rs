//! Diagnostic logging setup.
//!
//! Logs go to stderr so they never mix with rendered output on stdout.

use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive; overrides `-v`.
pub const LOG_ENV: &str = "PROPS_LOG";

/// Default filter level for a given `-v` count.
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global stderr subscriber. Later calls are no-ops.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level_for(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
