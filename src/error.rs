//! Error types for the cdscheck library.

use thiserror::Error;

/// Errors that can occur during cdscheck operations.
///
/// Expected biological-data problems are reported as messages in a
/// [`ValidationResult`](crate::validation::ValidationResult); this type is reserved
/// for I/O, malformed input and configuration problems.
#[derive(Debug, Error)]
pub enum Error {
    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A JSON document could not be read or written.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// A parse error occurred while reading input data.
    #[error("{0}")]
    Parse(String),

    /// Unknown translation table or a qualifier value of the wrong shape.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A remote location references a sequence the provider cannot supply.
    /// Callers skip translation-dependent checks rather than failing the batch.
    #[error("missing remote sequence: {0}")]
    MissingRemoteSequence(String),
}
