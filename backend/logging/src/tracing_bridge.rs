//! Tracing Bridge
//!
//! A handler that re-emits records as `tracing` events so they reach
//! whatever subscriber the process installed.

use anyhow::Result;
use tracing::Level;

use crate::config::LoggingConfig;
use crate::handler::Handler;
use crate::record::{LogRecord, RecordPayload};
use crate::redact::{redact_message, redact_sensitive_data};

/// Target used for every bridged event.
pub const BRIDGE_TARGET: &str = "logpp";

pub struct TracingHandler {
    redact: bool,
}

impl TracingHandler {
    pub fn new() -> Self {
        Self { redact: false }
    }

    /// Scrub tokens and phone numbers before emitting.
    pub fn redacting() -> Self {
        Self { redact: true }
    }

    /// Redacts when `redactSensitive` is `"all"`.
    pub fn from_config(config: &LoggingConfig) -> Self {
        Self {
            redact: config.redaction_enabled(),
        }
    }

    pub fn is_redacting(&self) -> bool {
        self.redact
    }
}

impl Default for TracingHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl Handler for TracingHandler {
    fn name(&self) -> &str {
        "tracing"
    }

    fn handle(&self, record: &LogRecord) -> Result<()> {
        match &record.payload {
            RecordPayload::Structured(message) => {
                let message = if self.redact {
                    redact_message(message)
                } else {
                    message.clone()
                };
                let detail = message.detail_json();
                emit(record.level, &record.logger, &message.to_string(), Some(&detail));
            }
            RecordPayload::PlainText(text) => {
                let text = if self.redact {
                    redact_sensitive_data(text)
                } else {
                    text.clone()
                };
                emit(record.level, &record.logger, &text, None);
            }
        }
        Ok(())
    }
}

// `tracing` macros need the level as a constant.
fn emit(level: Level, logger: &str, text: &str, detail: Option<&str>) {
    match level {
        Level::ERROR => tracing::error!(target: BRIDGE_TARGET, logger, detail, "{}", text),
        Level::WARN => tracing::warn!(target: BRIDGE_TARGET, logger, detail, "{}", text),
        Level::INFO => tracing::info!(target: BRIDGE_TARGET, logger, detail, "{}", text),
        Level::DEBUG => tracing::debug!(target: BRIDGE_TARGET, logger, detail, "{}", text),
        _ => tracing::trace!(target: BRIDGE_TARGET, logger, detail, "{}", text),
    }
}
