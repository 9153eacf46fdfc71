//! Handler traits and the structured dispatch filter.
//!
//! Every record a logger accepts is passed to each attached [`Handler`].
//! [`StructuredDispatch`] adapts a [`StructuredHandler`] so that only records
//! carrying a [`Message`] reach its callback; plain-text records take the
//! handler's default path instead.

use anyhow::Result;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::level_filters::LevelFilter;

use crate::message::Message;
use crate::record::{LogRecord, RecordPayload};

// ---------------------------------------------------------------------------
// Handler trait
// ---------------------------------------------------------------------------

/// Receives every record a logger dispatches.
pub trait Handler: Send + Sync {
    /// Human-readable name, used for removal and diagnostics.
    fn name(&self) -> &str;

    /// Records more verbose than this are not delivered.
    fn level(&self) -> LevelFilter {
        LevelFilter::TRACE
    }

    fn handle(&self, record: &LogRecord) -> Result<()>;
}

// ---------------------------------------------------------------------------
// Structured handlers
// ---------------------------------------------------------------------------

/// Logic that only cares about structured messages.
///
/// Wrap an implementation in [`StructuredDispatch`] to attach it to a logger.
pub trait StructuredHandler: Send + Sync {
    fn name(&self) -> &str {
        "structured"
    }

    /// Called exactly once per structured record.
    fn handle_message(&self, message: &Message) -> Result<()>;

    /// Called for plain-text records. Does nothing unless overridden.
    fn handle_plain(&self, _record: &LogRecord) -> Result<()> {
        Ok(())
    }
}

/// Routes structured records to a [`StructuredHandler`] callback.
pub struct StructuredDispatch<H> {
    inner: H,
    level: LevelFilter,
}

impl<H: StructuredHandler> StructuredDispatch<H> {
    pub fn new(inner: H) -> Self {
        Self {
            inner,
            level: LevelFilter::TRACE,
        }
    }

    /// Only dispatch records at or above `level`.
    pub fn with_level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    pub fn inner(&self) -> &H {
        &self.inner
    }

    pub fn into_inner(self) -> H {
        self.inner
    }
}

impl<H: StructuredHandler> Handler for StructuredDispatch<H> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn level(&self) -> LevelFilter {
        self.level
    }

    fn handle(&self, record: &LogRecord) -> Result<()> {
        match &record.payload {
            RecordPayload::Structured(message) => self.inner.handle_message(message),
            RecordPayload::PlainText(_) => self.inner.handle_plain(record),
        }
    }
}

// ---------------------------------------------------------------------------
// Built-in structured handlers
// ---------------------------------------------------------------------------

/// Counts structured messages.
#[derive(Debug, Default)]
pub struct CountingHandler {
    count: AtomicUsize,
}

impl CountingHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl StructuredHandler for CountingHandler {
    fn name(&self) -> &str {
        "counting"
    }

    fn handle_message(&self, _message: &Message) -> Result<()> {
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Keeps a copy of every structured message it sees.
#[derive(Debug, Default)]
pub struct CollectingHandler {
    messages: Mutex<Vec<Message>>,
}

impl CollectingHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<Message> {
        self.messages.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.messages.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.lock().is_empty()
    }

    /// Remove and return everything collected so far.
    pub fn drain(&self) -> Vec<Message> {
        std::mem::take(&mut *self.messages.lock())
    }
}

impl StructuredHandler for CollectingHandler {
    fn name(&self) -> &str {
        "collecting"
    }

    fn handle_message(&self, message: &Message) -> Result<()> {
        self.messages.lock().push(message.clone());
        Ok(())
    }
}
