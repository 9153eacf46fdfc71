//! Log records and their payloads.

use chrono::{DateTime, Utc};
use std::fmt;
use tracing::Level;

use crate::message::Message;

/// What a log call carried: plain text or a structured [`Message`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordPayload {
    PlainText(String),
    Structured(Message),
}

impl RecordPayload {
    /// The structured message, if this payload carries one.
    pub fn as_structured(&self) -> Option<&Message> {
        match self {
            RecordPayload::Structured(message) => Some(message),
            RecordPayload::PlainText(_) => None,
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, RecordPayload::Structured(_))
    }
}

impl fmt::Display for RecordPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordPayload::PlainText(text) => f.pad(text),
            RecordPayload::Structured(message) => fmt::Display::fmt(message, f),
        }
    }
}

impl From<&str> for RecordPayload {
    fn from(text: &str) -> Self {
        RecordPayload::PlainText(text.to_string())
    }
}

impl From<String> for RecordPayload {
    fn from(text: String) -> Self {
        RecordPayload::PlainText(text)
    }
}

impl From<Message> for RecordPayload {
    fn from(message: Message) -> Self {
        RecordPayload::Structured(message)
    }
}

/// A single log call as seen by handlers.
#[derive(Debug, Clone)]
pub struct LogRecord {
    /// Name of the logger the call was made through.
    pub logger: String,
    pub level: Level,
    pub payload: RecordPayload,
    pub timestamp: DateTime<Utc>,
}

impl LogRecord {
    pub fn new(logger: impl Into<String>, level: Level, payload: impl Into<RecordPayload>) -> Self {
        Self {
            logger: logger.into(),
            level,
            payload: payload.into(),
            timestamp: Utc::now(),
        }
    }

    /// The record rendered as text. Structured payloads render as their summary.
    pub fn message(&self) -> String {
        self.payload.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_payload_renders_text() {
        let record = LogRecord::new("app", Level::INFO, "retrying");
        assert_eq!(record.message(), "retrying");
        assert!(!record.payload.is_structured());
        assert!(record.payload.as_structured().is_none());
    }

    #[test]
    fn test_structured_payload_renders_summary() {
        let record = LogRecord::new(
            "app",
            Level::WARN,
            crate::msg!("disk full", "free_bytes" => 0),
        );
        assert_eq!(record.message(), "disk full");
        let message = record.payload.as_structured().unwrap();
        assert_eq!(message.get("free_bytes"), Some(&serde_json::json!(0)));
    }

    #[test]
    fn test_lookalike_text_is_not_structured() {
        // Same rendered text, different tag.
        let plain = RecordPayload::from("disk full");
        let structured = RecordPayload::from(Message::new("disk full"));
        assert_eq!(plain.to_string(), structured.to_string());
        assert_ne!(plain, structured);
        assert!(!plain.is_structured());
        assert!(structured.is_structured());
    }
}
