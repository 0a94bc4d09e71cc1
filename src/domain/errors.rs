//! Domain errors for Shedwright.
//!
//! Invalid field values never surface here; they are clamped or dropped
//! by `validate` and the proposal parser. These errors cover the I/O-facing
//! edges (spec files, serialization).

use std::path::PathBuf;

use thiserror::Error;

/// Domain-level errors that can occur at the edges of the engine.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A spec file could not be read.
    #[error("Failed to read spec file {path}: {source}")]
    SpecFileRead {
        /// File that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A spec file parsed as neither JSON nor YAML.
    #[error("Spec file {path} is not JSON or YAML: {reason}")]
    SpecFileFormat {
        /// File that failed
        path: PathBuf,
        /// Parser message
        reason: String,
    },

    /// A value could not be (de)serialized.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Result alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}
