// ============================================================================
// av1transcoder-cli/src/logging.rs
// ============================================================================
//
// LOGGING: Console Logger Setup
//
// The application logs through the standard `log` facade with `env_logger`
// as the backend. The level follows the --verbose flag:
// - default: info and above
// - --verbose: debug and above
// RUST_LOG, when set, takes precedence over both (e.g. RUST_LOG=trace).

use std::io::Write;

use log::{Level, LevelFilter};
use owo_colors::OwoColorize;

/// Environment variable overriding the verbosity-derived filter.
pub const LOG_FILTER_ENV: &str = "RUST_LOG";

/// Log level selected by the --verbose flag.
#[must_use]
pub fn level_for(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Initializes the global logger. Must be called once, before anything logs.
pub fn init(verbose: bool) {
    let colored = supports_color::on_cached(supports_color::Stream::Stderr).is_some();

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level_for(verbose));
    if let Ok(filters) = std::env::var(LOG_FILTER_ENV) {
        builder.parse_filters(&filters);
    }

    builder
        .format(move |buf, record| {
            let level = format!("{:<5}", record.level());
            let level = if colored {
                match record.level() {
                    Level::Error => level.bright_red().to_string(),
                    Level::Warn => level.yellow().to_string(),
                    Level::Info => level.green().to_string(),
                    Level::Debug => level.blue().to_string(),
                    Level::Trace => level.magenta().to_string(),
                }
            } else {
                level
            };
            writeln!(buf, "{} {} {}", buf.timestamp(), level, record.args())
        })
        .init();

    log::debug!("Logger initialized with level: {}", level_for(verbose));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_selects_debug() {
        assert_eq!(level_for(true), LevelFilter::Debug);
        assert_eq!(level_for(false), LevelFilter::Info);
    }
}
