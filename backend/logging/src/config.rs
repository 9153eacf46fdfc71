//! Logging configuration.
//!
//! Typed for serde YAML/JSON deserialization. Every field is optional;
//! [`LoggingConfig::apply_defaults`] fills in what a loaded file left out.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

use crate::error::LogppError;

/// Default level for loggers without a subsystem override.
pub const DEFAULT_LEVEL: &str = "info";

/// Default base name for rolling log files.
pub const DEFAULT_FILE_NAME: &str = "logpp.log";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redact_sensitive: Option<String>, // "none" | "all"
    /// Per-logger level overrides, keyed by logger name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subsystems: Option<HashMap<String, String>>,
    /// Directory for rolling JSON log files. No file output when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

impl LoggingConfig {
    pub fn from_yaml_str(raw: &str) -> Result<Self, LogppError> {
        let config: LoggingConfig = serde_yaml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Fill unset fields with their defaults.
    pub fn apply_defaults(mut self) -> Self {
        if self.level.is_none() {
            self.level = Some(DEFAULT_LEVEL.to_string());
        }
        if self.redact_sensitive.is_none() {
            self.redact_sensitive = Some("none".to_string());
        }
        if self.file_name.is_none() {
            self.file_name = Some(DEFAULT_FILE_NAME.to_string());
        }
        self
    }

    /// Check every level string and the redaction mode.
    pub fn validate(&self) -> Result<(), LogppError> {
        if let Some(level) = &self.level {
            parse_level(level)?;
        }
        for level in self.subsystems.iter().flat_map(|s| s.values()) {
            parse_level(level)?;
        }
        match self.redact_sensitive.as_deref() {
            None | Some("none") | Some("all") => Ok(()),
            Some(other) => Err(LogppError::Config(format!(
                "redactSensitive must be \"none\" or \"all\", got \"{other}\""
            ))),
        }
    }

    pub fn default_level(&self) -> LevelFilter {
        self.level
            .as_deref()
            .and_then(|l| parse_level(l).ok())
            .unwrap_or(LevelFilter::INFO)
    }

    /// Level for the named logger: its subsystem override, else the default.
    pub fn level_for(&self, name: &str) -> LevelFilter {
        self.subsystems
            .as_ref()
            .and_then(|s| s.get(name))
            .and_then(|l| parse_level(l).ok())
            .unwrap_or_else(|| self.default_level())
    }

    pub fn redaction_enabled(&self) -> bool {
        self.redact_sensitive.as_deref() == Some("all")
    }

    pub fn file_name(&self) -> &str {
        self.file_name.as_deref().unwrap_or(DEFAULT_FILE_NAME)
    }
}

/// Parse a level name such as `"info"` or `"WARNING"`.
pub fn parse_level(raw: &str) -> Result<LevelFilter, LogppError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok(LevelFilter::TRACE),
        "debug" => Ok(LevelFilter::DEBUG),
        "info" => Ok(LevelFilter::INFO),
        "warn" | "warning" => Ok(LevelFilter::WARN),
        "error" => Ok(LevelFilter::ERROR),
        "off" => Ok(LevelFilter::OFF),
        _ => Err(LogppError::InvalidLevel(raw.to_string())),
    }
}
