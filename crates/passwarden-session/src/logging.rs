//! Global `tracing` subscriber setup.
//!
//! `RUST_LOG` wins over [`ClientConfig::log_level`]. File output goes
//! through a non-blocking daily rolling appender; keep the returned
//! guard alive for as long as logs should be flushed.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::ClientConfig;
use crate::error::SessionError;

const LOG_FILE_PREFIX: &str = "passwarden.log";

/// Build the level filter: `RUST_LOG` if set, else the configured level.
///
/// # Errors
///
/// Returns [`SessionError::Logging`] when the configured directive does
/// not parse.
pub fn env_filter(config: &ClientConfig) -> Result<EnvFilter, SessionError> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| SessionError::Logging(e.to_string()))
}

/// Install the global subscriber described by `config`.
///
/// Returns the appender guard when logging to a file.
///
/// # Errors
///
/// Returns [`SessionError::Logging`] if the filter is invalid or a global
/// subscriber is already installed.
pub fn init_logging(
    config: &ClientConfig,
    data_dir: &Path,
) -> Result<Option<WorkerGuard>, SessionError> {
    let filter = env_filter(config)?;

    if config.log_to_file {
        let appender =
            tracing_appender::rolling::daily(config.resolved_log_dir(data_dir), LOG_FILE_PREFIX);
        let (writer, guard) = tracing_appender::non_blocking(appender);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(writer).with_ansi(false))
            .try_init()
            .map_err(|e| SessionError::Logging(e.to_string()))?;

        Ok(Some(guard))
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init()
            .map_err(|e| SessionError::Logging(e.to_string()))?;

        Ok(None)
    }
}
