//! Named loggers.
//!
//! A [`Logger`] owns a level threshold and an ordered list of handlers.
//! Records it accepts are handed to each handler in attachment order on
//! the calling thread.

use parking_lot::RwLock;
use std::sync::Arc;
use tracing::level_filters::LevelFilter;
use tracing::{debug, warn, Level};

use crate::error::LogppError;
use crate::handler::Handler;
use crate::record::{LogRecord, RecordPayload};

pub struct Logger {
    name: String,
    level: RwLock<LevelFilter>,
    handlers: RwLock<Vec<Arc<dyn Handler>>>,
}

impl Logger {
    pub fn new(name: impl Into<String>, level: LevelFilter) -> Self {
        Self {
            name: name.into(),
            level: RwLock::new(level),
            handlers: RwLock::new(Vec::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> LevelFilter {
        *self.level.read()
    }

    pub fn set_level(&self, level: LevelFilter) {
        *self.level.write() = level;
    }

    pub fn is_enabled_for(&self, level: Level) -> bool {
        level <= self.level()
    }

    pub fn add_handler(&self, handler: Arc<dyn Handler>) {
        debug!(logger = %self.name, handler = handler.name(), "Handler attached");
        self.handlers.write().push(handler);
    }

    /// Detach every handler with the given name. Returns whether any was removed.
    pub fn remove_handler(&self, name: &str) -> bool {
        let mut handlers = self.handlers.write();
        let before = handlers.len();
        handlers.retain(|h| h.name() != name);
        let removed = handlers.len() != before;
        if removed {
            debug!(logger = %self.name, handler = name, "Handler removed");
        }
        removed
    }

    pub fn clear_handlers(&self) {
        self.handlers.write().clear();
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.read().len()
    }

    /// Log a plain string or a structured message at `level`.
    ///
    /// Handler failures are reported through `tracing` and never reach the caller.
    pub fn log(&self, level: Level, payload: impl Into<RecordPayload>) {
        if !self.is_enabled_for(level) {
            return;
        }
        self.dispatch(&LogRecord::new(self.name.as_str(), level, payload));
    }

    /// Hand an already built record to every handler whose level accepts it.
    pub fn dispatch(&self, record: &LogRecord) {
        // Snapshot so handlers may log or attach handlers without deadlocking.
        let handlers: Vec<Arc<dyn Handler>> = self.handlers.read().clone();
        for handler in handlers.iter() {
            if record.level > handler.level() {
                continue;
            }
            if let Err(e) = handler.handle(record) {
                let err = LogppError::Handler {
                    handler: handler.name().to_string(),
                    message: e.to_string(),
                };
                warn!(logger = %self.name, "{}", err);
            }
        }
    }

    pub fn trace(&self, payload: impl Into<RecordPayload>) {
        self.log(Level::TRACE, payload);
    }

    pub fn debug(&self, payload: impl Into<RecordPayload>) {
        self.log(Level::DEBUG, payload);
    }

    pub fn info(&self, payload: impl Into<RecordPayload>) {
        self.log(Level::INFO, payload);
    }

    pub fn warn(&self, payload: impl Into<RecordPayload>) {
        self.log(Level::WARN, payload);
    }

    pub fn error(&self, payload: impl Into<RecordPayload>) {
        self.log(Level::ERROR, payload);
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("level", &self.level())
            .field("handlers", &self.handler_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::{CollectingHandler, CountingHandler, StructuredDispatch};
    use crate::message::Message;
    use anyhow::{bail, Result};
    use parking_lot::Mutex;
    use proptest::prelude::*;
    use tracing_test::traced_test;

    /// Records the order in which handlers ran.
    struct Tagged {
        tag: &'static str,
        seen: Arc<Mutex<Vec<&'static str>>>,
        fail: bool,
    }

    impl Handler for Tagged {
        fn name(&self) -> &str {
            self.tag
        }

        fn handle(&self, _record: &LogRecord) -> Result<()> {
            self.seen.lock().push(self.tag);
            if self.fail {
                bail!("{} refused the record", self.tag);
            }
            Ok(())
        }
    }

    #[test]
    fn test_counts_only_structured_records() {
        let logger = Logger::new("TestLogppHandler", LevelFilter::INFO);
        let counter = Arc::new(StructuredDispatch::new(CountingHandler::new()));
        logger.add_handler(counter.clone());

        for _ in 0..10 {
            logger.info(crate::msg!("test", "a" => 1, "b" => 2));
            logger.info("not counted");
        }

        assert_eq!(counter.inner().count(), 10);
    }

    #[test]
    fn test_level_threshold_drops_records() {
        let logger = Logger::new("quiet", LevelFilter::WARN);
        let collector = Arc::new(StructuredDispatch::new(CollectingHandler::new()));
        logger.add_handler(collector.clone());

        logger.info(Message::new("dropped"));
        logger.debug(Message::new("dropped too"));
        logger.error(Message::new("kept"));

        let summaries: Vec<String> = collector
            .inner()
            .messages()
            .iter()
            .map(|m| m.to_string())
            .collect();
        assert_eq!(summaries, vec!["kept"]);
        assert!(logger.is_enabled_for(Level::WARN));
        assert!(!logger.is_enabled_for(Level::INFO));
    }

    #[test]
    fn test_handler_level_is_respected() {
        let logger = Logger::new("mixed", LevelFilter::TRACE);
        let errors_only = Arc::new(
            StructuredDispatch::new(CountingHandler::new()).with_level(LevelFilter::ERROR),
        );
        logger.add_handler(errors_only.clone());

        logger.info(Message::new("info"));
        logger.error(Message::new("error"));
        assert_eq!(errors_only.inner().count(), 1);
    }

    #[traced_test]
    #[test]
    fn test_failing_handler_does_not_stop_chain() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let logger = Logger::new("chain", LevelFilter::INFO);
        logger.add_handler(Arc::new(Tagged { tag: "first", seen: seen.clone(), fail: true }));
        logger.add_handler(Arc::new(Tagged { tag: "second", seen: seen.clone(), fail: false }));

        logger.info("hello");

        assert_eq!(*seen.lock(), vec!["first", "second"]);
        assert!(logs_contain("handler first failed: first refused the record"));
    }

    #[test]
    fn test_remove_and_clear_handlers() {
        let logger = Logger::new("handlers", LevelFilter::INFO);
        logger.add_handler(Arc::new(StructuredDispatch::new(CountingHandler::new())));
        logger.add_handler(Arc::new(StructuredDispatch::new(CollectingHandler::new())));
        assert_eq!(logger.handler_count(), 2);

        assert!(logger.remove_handler("counting"));
        assert!(!logger.remove_handler("counting"));
        assert_eq!(logger.handler_count(), 1);

        logger.clear_handlers();
        assert_eq!(logger.handler_count(), 0);
        logger.info(Message::new("nobody listening"));
    }

    proptest! {
        #[test]
        fn prop_counter_equals_structured_calls(calls in prop::collection::vec(any::<bool>(), 0..64)) {
            let logger = Logger::new("interleaved", LevelFilter::INFO);
            let counter = Arc::new(StructuredDispatch::new(CountingHandler::new()));
            logger.add_handler(counter.clone());

            for structured in &calls {
                if *structured {
                    logger.info(Message::new("structured"));
                } else {
                    logger.info("plain");
                }
            }

            let expected = calls.iter().filter(|s| **s).count();
            prop_assert_eq!(counter.inner().count(), expected);
        }
    }
}
