//! Error types for sahayak.

use std::io;
use thiserror::Error;

/// Result type alias for sahayak operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in sahayak operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Input failed a flow's input contract.
    #[error("Invalid {field}: {message}")]
    Validation {
        /// Name of the offending input field.
        field: String,
        /// What the field must satisfy.
        message: String,
    },

    /// Prompt template placeholder could not be bound.
    #[error("Template error: {0}")]
    Template(String),

    /// Data-URI encoding/decoding failure or oversize upload.
    #[error("Media error: {0}")]
    Media(String),

    /// The generation backend failed or returned an unusable result.
    #[error("Generation failed: {0}")]
    Generation(String),

    /// HTTP transport error talking to the generation backend.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The generation API returned an error response.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the API body.
        message: String,
    },

    /// JSON serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Storage I/O error.
    #[error("Storage error: {0}")]
    Storage(#[from] io::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Shorthand for a validation failure on a named field.
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}
