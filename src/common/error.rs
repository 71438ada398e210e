//! Unified error type for deckwright.
//!
//! Lower layers (the OOXML writer, the LLM client) carry their own error enums
//! and convert into [`Error`] at the crate boundary.
use thiserror::Error;

/// Main error type for deckwright operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// XML generation error
    #[error("XML error: {0}")]
    Xml(String),

    /// ZIP archive error
    #[error("ZIP error: {0}")]
    Zip(String),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML configuration error
    #[error("YAML error: {0}")]
    Yaml(String),

    /// Input is not in an accepted format
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Input is recognised but not supported
    #[error("Unsupported: {0}")]
    Unsupported(String),

    /// File or named resource does not exist
    #[error("File not found: {0}")]
    NotFound(String),

    /// A request or layout failed validation
    #[error("Validation failed: {0}")]
    Validation(String),

    /// LLM provider error
    #[error("LLM error: {0}")]
    Llm(#[from] crate::llm::LlmError),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Result type for deckwright operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<crate::ooxml::error::OoxmlError> for Error {
    fn from(err: crate::ooxml::error::OoxmlError) -> Self {
        use crate::ooxml::error::OoxmlError;
        match err {
            OoxmlError::Io(e) => Error::Io(e),
            OoxmlError::Xml(msg) => Error::Xml(msg),
            OoxmlError::Zip(msg) => Error::Zip(msg),
            other => Error::Other(other.to_string()),
        }
    }
}

impl From<std::fmt::Error> for Error {
    fn from(err: std::fmt::Error) -> Self {
        Error::Xml(err.to_string())
    }
}
