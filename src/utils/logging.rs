//! Structured logging setup.
//!
//! Installs a global `tracing` subscriber built from [`LoggingConfig`].
//! `RUST_LOG` takes precedence over the configured level when set.

use crate::config::LoggingConfig;
use crate::error::{constants::ERR_LOGGING_INIT, ProtocolError, Result};
use std::fs::OpenOptions;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber described by `config`.
///
/// Fails if the log file cannot be opened or a subscriber is already set.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str().to_ascii_lowercase()));

    let file = match (&config.log_file_path, config.log_to_file) {
        (Some(path), true) => Some(Arc::new(
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| {
                    ProtocolError::ConfigError(format!("Failed to open log file {path}: {e}"))
                })?,
        )),
        _ => None,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let installed = match (config.json_format, file) {
        (true, Some(file)) => builder.json().with_writer(file).try_init(),
        (true, None) => builder.json().try_init(),
        (false, Some(file)) => builder.with_ansi(false).with_writer(file).try_init(),
        (false, None) => builder.try_init(),
    };

    installed.map_err(|e| ProtocolError::ConfigError(format!("{ERR_LOGGING_INIT}: {e}")))?;

    tracing::info!(app = %config.app_name, level = %config.log_level, "logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_once() {
        let unwritable = LoggingConfig {
            log_to_file: true,
            log_file_path: Some("/nonexistent-dir/packet-wire/wire.log".to_string()),
            ..LoggingConfig::default()
        };
        assert!(matches!(
            init_logging(&unwritable),
            Err(ProtocolError::ConfigError(_))
        ));

        let config = LoggingConfig::default();
        assert!(init_logging(&config).is_ok());

        // A global subscriber can only be installed once
        match init_logging(&config) {
            Err(ProtocolError::ConfigError(message)) => {
                assert!(message.starts_with(ERR_LOGGING_INIT))
            }
            other => panic!("second init should fail, got {other:?}"),
        }
    }
}
