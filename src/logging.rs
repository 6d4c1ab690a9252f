//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` syntax is accepted in `log_level`; an unparsable filter falls
/// back to `info`. `json` format emits one JSON object per event, `text`
/// emits human-readable lines with ANSI colors.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init(config: &Config) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = if config.log_format == "json" {
        builder.json().with_current_span(true).try_init()
    } else {
        builder.with_target(false).try_init()
    };

    result.map_err(|e| anyhow::anyhow!("failed to init tracing: {e}"))
}
