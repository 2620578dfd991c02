//! Error types for quotebook-core

use thiserror::Error;

/// Result type alias using quotebook-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in quotebook-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored, imported, or fetched text did not match the quote schema
    #[error("Invalid {source_name} data: {message}")]
    Decode {
        source_name: &'static str,
        message: String,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP transport error while talking to the quote server
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Quote server answered with an error status
    #[error("Quote server error: {0}")]
    Remote(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Build a decode error for the named data source.
    pub fn decode(source_name: &'static str, message: impl Into<String>) -> Self {
        Self::Decode {
            source_name,
            message: message.into(),
        }
    }

    /// Whether this error came from malformed data rather than I/O or network.
    #[must_use]
    pub const fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }
}
