//! Tracing subscriber setup

use crate::config::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. `RUST_LOG` takes precedence over the configured level.
///
/// Logs go to stderr; stdout is reserved for rendered output.
/// Returns `false` when a subscriber was already installed, which is then kept.
pub fn init(config: &LoggingConfig) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| configured_filter(config));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let result = if config.format == "json" {
        builder.json().try_init()
    } else {
        builder.pretty().try_init()
    };

    if result.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
    result.is_ok()
}

/// Filter for this crate at the configured level
fn configured_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::new(format!("weathercards={}", config.level))
}
