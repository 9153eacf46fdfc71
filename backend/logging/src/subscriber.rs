//! Subscriber Setup
//!
//! Builds a `tracing` subscriber with a console layer and, when a log
//! directory is configured, a daily rolling NDJSON file layer.

use tracing::Subscriber;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;
use crate::error::LogppError;
use crate::registry::configure;

/// Build the subscriber described by `config` without installing it.
///
/// `RUST_LOG` takes precedence over the configured level. Fails if the log
/// directory cannot be created or opened.
pub fn build_subscriber(
    config: &LoggingConfig,
) -> Result<impl Subscriber + Send + Sync + use<>, LogppError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_level().to_string()));

    // Standard console layer
    let console_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(false)
        .with_ansi(true);

    // Rolling file appender: writes NDJSON to `<log_dir>/<file_name>.YYYY-MM-DD`
    let file_layer = match config.log_dir.as_deref() {
        Some(dir) => {
            let appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix(config.file_name())
                .build(dir)
                .map_err(|e| {
                    LogppError::Config(format!("cannot open log directory {}: {e}", dir.display()))
                })?;
            Some(
                fmt::layer()
                    .json()
                    .with_writer(appender)
                    .with_ansi(false),
            )
        }
        None => None,
    };

    Ok(tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer))
}

/// Install the subscriber described by `config` as the global default and
/// hand `config` to the global logger registry.
///
/// Returns `Ok(false)` if a global subscriber was already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<bool, LogppError> {
    let subscriber = build_subscriber(config)?;
    configure(config.clone());
    Ok(subscriber.try_init().is_ok())
}
