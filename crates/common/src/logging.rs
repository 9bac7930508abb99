//! Tracing setup for the batch driver.
//!
//! Log records go to stderr; stdout carries only the batch report.

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingConfig;

/// Level filter for the run. `RUST_LOG` wins over the configured level, and
/// an unparsable level falls back to `info`.
fn level_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|err| {
            eprintln!("Ignoring log level {:?}: {err}", config.level);
            EnvFilter::new("info")
        })
}

/// Install the global subscriber.
///
/// Returns `false` if a subscriber was already installed.
pub fn init_logging(config: &LoggingConfig) -> bool {
    let builder = fmt()
        .with_env_filter(level_filter(config))
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = if config.json {
        builder.json().flatten_event(true).try_init()
    } else {
        builder.compact().try_init()
    };
    installed.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_install_is_rejected() {
        let config = LoggingConfig::default();
        init_logging(&config);
        assert!(!init_logging(&config));
    }
}
