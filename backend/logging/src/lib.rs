//! Structured log messages for named loggers.
//!
//! A [`Message`] pairs a short summary with a free-form detail mapping and
//! renders as its summary wherever text is expected. Loggers accept either a
//! plain string or a `Message`; handlers wrapped in [`StructuredDispatch`]
//! only ever see the structured ones. [`HasLogger`] names a type's logger
//! after its module path and type name.

pub mod config;
pub mod error;
pub mod handler;
pub mod logger;
pub mod message;
pub mod naming;
pub mod record;
pub mod redact;
pub mod registry;
pub mod subscriber;
pub mod tracing_bridge;

pub use config::{parse_level, LoggingConfig};
pub use error::LogppError;
pub use handler::{CollectingHandler, CountingHandler, Handler, StructuredDispatch, StructuredHandler};
pub use logger::Logger;
pub use message::{msg, Detail, Message};
pub use naming::{logger_name_of, resolve_logger_name, HasLogger};
pub use record::{LogRecord, RecordPayload};
pub use redact::{redact_message, redact_sensitive_data};
pub use registry::{configure, get_logger, LoggerRegistry};
pub use subscriber::{build_subscriber, init_tracing};
pub use tracing_bridge::TracingHandler;

// Re-exported levels so callers need not depend on `tracing` directly.
pub use tracing::level_filters::LevelFilter;
pub use tracing::Level;

#[doc(hidden)]
pub mod __private {
    pub use serde_json;
}
