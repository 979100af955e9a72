//! Tempest client error types

use thiserror::Error;

/// Tempest client error type
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport error (connectivity, authentication, server failure)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Unknown stream or type
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed window, count, predicate, or wire payload
    #[error("Validation error: {0}")]
    Validation(String),

    /// HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for tempest client operations
pub type Result<T> = std::result::Result<T, Error>;
