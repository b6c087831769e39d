use super::types::LogLevel;
use crate::config::LoggingConfig;
use crate::utils::error::{RbacError, Result};
use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber.
///
/// Output goes to stderr. `RUST_LOG` takes precedence over the configured level when it is set.
/// Fails if a global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let level: LogLevel = config.level.parse()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.with_target)
        .with_thread_ids(false)
        .with_writer(std::io::stderr);

    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| RbacError::internal(format!("Failed to install logger: {}", e)))
}
