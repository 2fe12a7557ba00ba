//! Error types for chatlens-core

use thiserror::Error;

/// Main error type for the chatlens-core library
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// HTTP transport or status failure while fetching a document
    #[error("failed to fetch {resource}: {message}")]
    Http { resource: String, message: String },

    /// A fetch did not settle within the configured limit
    #[error("timed out fetching {resource} after {limit_ms}ms")]
    Timeout { resource: String, limit_ms: u64 },

    /// Source location could not be used
    #[error("invalid source location: {0}")]
    Resource(String),
}

/// Result type alias for chatlens-core
pub type Result<T> = std::result::Result<T, Error>;
