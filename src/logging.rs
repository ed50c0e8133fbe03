//! Logging bootstrap for embedders of the store.
//!
//! The crate itself only emits `tracing` events; installing a subscriber is
//! left to the host, which may call [`init_logging`] or bring its own.

use crate::error::{Result, TaskNestError};
use tracing_subscriber::EnvFilter;

/// Installs a global fmt subscriber.
///
/// `RUST_LOG` takes precedence over `default_level`. Returns `Ok(false)` when
/// a global subscriber was already set, which is not an error.
pub fn init_logging(default_level: &str) -> Result<bool> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_level).map_err(|err| {
            TaskNestError::ConfigError(format!("invalid log level {:?}: {}", default_level, err))
        })?,
    };

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!("Logging initialized");
    }
    Ok(installed)
}
