//! Error types for eventmap.
//!
//! Uses `thiserror` for library-style error definitions.

use thiserror::Error;

/// Errors that can occur in eventmap operations.
#[derive(Error, Debug)]
pub enum EventMapError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("Failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Event server returned an error status
    #[error("event server error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// Event validation failed
    #[error("Invalid event data: {0}")]
    Validation(String),

    /// Durable session storage failed
    #[error("session storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Configuration file could not be parsed
    #[error("invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration is missing or inconsistent
    #[error("configuration error: {0}")]
    Config(String),
}
