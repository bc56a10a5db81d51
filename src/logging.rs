//! Diagnostic logging.
//!
//! Logs go to stderr so they never mix with a digest printed on stdout.
//! The filter comes from `ZIPINGEST_LOG` when set (any `EnvFilter`
//! directive, e.g. `zipingest=debug`), else from the `-v` count.

use std::io::IsTerminal;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Environment variable holding an explicit filter directive.
pub const LOG_ENV: &str = "ZIPINGEST_LOG";

/// Default level for a given `-v` count.
pub fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn build_env_filter(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level_for_verbosity(verbosity)))
}

/// Install the global subscriber.
///
/// Fails if a subscriber is already installed.
pub fn init_logging(verbosity: u8) -> Result<(), tracing_subscriber::util::TryInitError> {
    let ansi = std::io::stderr().is_terminal();

    Registry::default()
        .with(build_env_filter(verbosity))
        .with(
            fmt::layer()
                .with_target(verbosity >= 2)
                .with_ansi(ansi)
                .with_writer(std::io::stderr),
        )
        .try_init()
}
