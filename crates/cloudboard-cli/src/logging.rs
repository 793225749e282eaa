//! Tracing subscriber setup for the `cloudboard` binary.
//!
//! Filter priority (highest first): `CLOUDBOARD_LOG`, `RUST_LOG`, then
//! `--log-level`. Logs go to stderr so stdout stays clean for JSON/CSV.

use is_terminal::IsTerminal;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

use crate::types::LogLevel;

pub const LOG_ENV_VAR: &str = "CLOUDBOARD_LOG";

/// Install the global subscriber; later calls are no-ops.
pub fn init(level: LogLevel, no_color: bool) {
    let filter = build_env_filter(level);
    let use_ansi = !no_color && std::io::stderr().is_terminal();

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(use_ansi)
        .with_target(false)
        .without_time()
        .compact();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

fn build_env_filter(level: LogLevel) -> EnvFilter {
    if let Ok(directives) = std::env::var(LOG_ENV_VAR)
        && let Ok(filter) = EnvFilter::try_new(&directives)
    {
        return filter;
    }

    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    EnvFilter::new(level.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_level_builds_a_filter() {
        for level in [
            LogLevel::Error,
            LogLevel::Warn,
            LogLevel::Info,
            LogLevel::Debug,
            LogLevel::Trace,
        ] {
            let _filter = build_env_filter(level);
        }
    }
}
