//! Structured Message Envelope
//!
//! A summary string plus a free-form detail mapping. Renders as its summary
//! wherever plain text is expected, so it can travel through any consumer
//! that only knows how to format records as strings.

use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Key/value detail carried alongside the summary.
pub type Detail = HashMap<String, Value>;

/// A structured log message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    summary: String,
    detail: Detail,
}

impl Message {
    /// Create a message with an empty detail mapping.
    pub fn new(summary: impl Into<String>) -> Self {
        Self::with_detail(summary, Detail::new())
    }

    pub fn with_detail(summary: impl Into<String>, detail: Detail) -> Self {
        Self {
            summary: summary.into(),
            detail,
        }
    }

    /// Return a copy of this message with one more detail entry.
    ///
    /// Values that fail to convert are stored as `null`.
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        let value = serde_json::to_value(value).unwrap_or(Value::Null);
        self.detail.insert(key.into(), value);
        self
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn detail(&self) -> &Detail {
        &self.detail
    }

    /// Look up a single detail entry.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.detail.get(key)
    }

    /// Render the detail mapping as a compact JSON object.
    pub fn detail_json(&self) -> String {
        serde_json::to_string(&self.detail).unwrap_or_else(|_| "{}".into())
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.summary)
    }
}

/// Build a [`Message`] from a summary and an optional detail mapping.
///
/// ```
/// use logpp::msg;
///
/// let m = msg("cache miss", None);
/// assert_eq!(m.to_string(), "cache miss");
/// assert!(m.detail().is_empty());
/// ```
pub fn msg(summary: impl Into<String>, detail: impl Into<Option<Detail>>) -> Message {
    Message::with_detail(summary, detail.into().unwrap_or_default())
}

/// Build a [`Message`] inline at a call site.
///
/// Values use `serde_json::json!` syntax; wrap compound expressions in
/// parentheses.
///
/// ```
/// let m = logpp::msg!("disk full", "path" => "/var", "free_bytes" => 0);
/// assert_eq!(m.summary(), "disk full");
/// assert_eq!(m.get("free_bytes"), Some(&serde_json::json!(0)));
/// ```
#[macro_export]
macro_rules! msg {
    ($summary:expr $(,)?) => {
        $crate::Message::new($summary)
    };
    ($summary:expr, $($key:expr => $value:tt),+ $(,)?) => {{
        let mut detail = $crate::Detail::new();
        $(
            detail.insert(::std::string::String::from($key), $crate::__private::serde_json::json!($value));
        )+
        $crate::Message::with_detail($summary, detail)
    }};
}
