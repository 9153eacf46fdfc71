//! Log Redaction
//!
//! Scrubs API keys, access tokens, and phone numbers from log text and from
//! the string values inside structured message detail.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

use crate::message::{Detail, Message};

static TELEPHONE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?:\+?\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}").unwrap());
static API_KEY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(sk-[a-zA-Z0-9]{32,})|(Bearer\s+[a-zA-Z0-9\-\._~+/]+=*)").unwrap());

/// Redacts sensitive patterns in a string.
pub fn redact_sensitive_data(input: &str) -> String {
    let redacted = TELEPHONE_RE.replace_all(input, "[REDACTED_PHONE]");
    API_KEY_RE.replace_all(&redacted, "[REDACTED_TOKEN]").into_owned()
}

/// Copy of `message` with its summary and every string in its detail redacted.
pub fn redact_message(message: &Message) -> Message {
    let detail: Detail = message
        .detail()
        .iter()
        .map(|(k, v)| (k.clone(), redact_value(v)))
        .collect();
    Message::with_detail(redact_sensitive_data(message.summary()), detail)
}

fn redact_value(value: &Value) -> Value {
    match value {
        Value::String(s) => Value::String(redact_sensitive_data(s)),
        Value::Array(items) => Value::Array(items.iter().map(redact_value).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), redact_value(v)))
                .collect(),
        ),
        other => other.clone(),
    }
}
