use thiserror::Error;

/// Errors surfaced by configuration and setup. Log calls themselves never fail.
#[derive(Debug, Error)]
pub enum LogppError {
    #[error("invalid log level: {0}")]
    InvalidLevel(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("handler {handler} failed: {message}")]
    Handler { handler: String, message: String },
}

impl From<serde_yaml::Error> for LogppError {
    fn from(err: serde_yaml::Error) -> Self {
        LogppError::Config(err.to_string())
    }
}
