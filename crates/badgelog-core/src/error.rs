//! Error types for logger construction and destination writes

use thiserror::Error;

/// Errors that can occur while building a logger or writing to a destination
///
/// Logging a message never produces one of these by itself: errors passed to a
/// log method are data to render. These only surface for misconfiguration
/// (fail-fast at creation) and from `LogMethod::try_log`.
#[derive(Error, Debug)]
pub enum LogError {
    #[error("Unknown color: {0}")]
    UnknownColor(String),

    #[error("Destination {name} failed: {source}")]
    Destination {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type LogResult<T> = Result<T, LogError>;
