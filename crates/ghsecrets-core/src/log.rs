//! Logging setup for ghsecrets.
//!
//! Logs go to stderr so stdout stays reserved for workflow commands.

use ghsecrets_types::{LogFormat, Result, SecretError};
use tracing_subscriber::{fmt, EnvFilter};

/// Crates whose events are shown by default.
const CRATES: &[&str] = &[
    "ghsecrets",
    "ghsecrets_types",
    "ghsecrets_core",
    "ghsecrets_services",
    "ghsecrets_sync",
];

/// Default filter directives for the given verbosity.
pub fn default_directives(debug: bool) -> String {
    let level = if debug { "debug" } else { "info" };
    CRATES
        .iter()
        .map(|krate| format!("{}={}", krate, level))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize the global subscriber.
///
/// `RUST_LOG` takes precedence over `debug` when set.
pub fn init(format: LogFormat, debug: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(debug)));

    let builder = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    let result = match format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    result.map_err(|e| SecretError::Config(format!("Failed to initialize logging: {}", e)))
}
