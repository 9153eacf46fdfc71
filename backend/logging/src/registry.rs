//! Logger registry.
//!
//! Maps names to shared [`Logger`] handles, creating them on first request.
//! A process-wide registry backs [`get_logger`]; separate registries can be
//! built for isolation.

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::config::LoggingConfig;
use crate::logger::Logger;

static GLOBAL: Lazy<LoggerRegistry> = Lazy::new(LoggerRegistry::new);

/// Thread-safe name to logger map.
#[derive(Default)]
pub struct LoggerRegistry {
    loggers: RwLock<HashMap<String, Arc<Logger>>>,
    config: RwLock<LoggingConfig>,
}

impl LoggerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// New loggers take their level from `config`.
    pub fn from_config(config: LoggingConfig) -> Self {
        Self {
            loggers: RwLock::new(HashMap::new()),
            config: RwLock::new(config),
        }
    }

    /// Replace the configuration and re-level every existing logger from it.
    pub fn set_config(&self, config: LoggingConfig) {
        let loggers = self.loggers.read();
        for (name, logger) in loggers.iter() {
            logger.set_level(config.level_for(name));
        }
        *self.config.write() = config;
        debug!(loggers = loggers.len(), "Registry configuration replaced");
    }

    /// The global registry used by [`get_logger`].
    pub fn global() -> &'static LoggerRegistry {
        &GLOBAL
    }

    /// Return the logger registered under `name`, creating it if needed.
    pub fn get_logger(&self, name: &str) -> Arc<Logger> {
        if let Some(logger) = self.loggers.read().get(name) {
            return logger.clone();
        }

        let mut loggers = self.loggers.write();
        loggers
            .entry(name.to_string())
            .or_insert_with(|| {
                let level = self.config.read().level_for(name);
                debug!(logger = name, %level, "Logger created");
                Arc::new(Logger::new(name, level))
            })
            .clone()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.loggers.read().contains_key(name)
    }

    /// Names of every logger created so far, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.loggers.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.loggers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.loggers.read().is_empty()
    }

    pub fn config(&self) -> LoggingConfig {
        self.config.read().clone()
    }
}

/// Install `config` into the global registry used by [`get_logger`] and
/// [`HasLogger::logger`](crate::HasLogger::logger).
pub fn configure(config: LoggingConfig) {
    LoggerRegistry::global().set_config(config);
}

/// Look up or create a logger in the global registry.
pub fn get_logger(name: &str) -> Arc<Logger> {
    LoggerRegistry::global().get_logger(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn test_lookup_is_idempotent() {
        let registry = LoggerRegistry::new();
        let a = registry.get_logger("service.api");
        let b = registry.get_logger("service.api");
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(registry.len(), 1);
        assert_eq!(a.name(), "service.api");
    }

    #[test]
    fn test_levels_come_from_config() {
        let config = LoggingConfig::from_yaml_str(
            "level: error\nsubsystems:\n  noisy: trace\n",
        )
        .unwrap();
        let registry = LoggerRegistry::from_config(config);

        assert_eq!(registry.get_logger("noisy").level(), LevelFilter::TRACE);
        assert_eq!(registry.get_logger("calm").level(), LevelFilter::ERROR);
        assert_eq!(registry.names(), vec!["calm", "noisy"]);
    }

    #[test]
    fn test_default_registry_uses_info() {
        let registry = LoggerRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.get_logger("x").level(), LevelFilter::INFO);
        assert!(registry.contains("x"));
    }

    #[test]
    fn test_set_config_relevels_existing_loggers() {
        let registry = LoggerRegistry::new();
        let early = registry.get_logger("jobs.worker");
        assert_eq!(early.level(), LevelFilter::INFO);

        registry.set_config(
            LoggingConfig::from_yaml_str("level: warn\nsubsystems:\n  jobs.worker: debug\n").unwrap(),
        );

        assert_eq!(early.level(), LevelFilter::DEBUG);
        assert_eq!(registry.get_logger("jobs.other").level(), LevelFilter::WARN);
        assert_eq!(registry.config().default_level(), LevelFilter::WARN);
    }

    #[test]
    fn test_global_registry_shares_handles() {
        let a = get_logger("registry.tests.global");
        let b = LoggerRegistry::global().get_logger("registry.tests.global");
        assert!(Arc::ptr_eq(&a, &b));
    }
}
