//! Logging set-up for the `fieldmap-gen` binary.
//!
//! Events go to standard error through `tracing-subscriber`. `RUST_LOG`
//! takes precedence over the verbosity flag when it is set.

use tracing_subscriber::EnvFilter;

use crate::error::GenError;

/// Maps the number of `-v` flags to a default filter directive.
#[must_use]
pub const fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Installs the global subscriber.
///
/// # Errors
///
/// Returns [`GenError::Logging`] when a global subscriber is already set.
pub fn init(verbosity: u8) -> Result<(), GenError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| GenError::Logging(err.to_string()))
}
