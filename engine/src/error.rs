//! Error types for the Waypost engine.

use thiserror::Error;

/// Client-input errors raised before any record is touched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("limit must be a natural number greater than 0")]
    InvalidLimit,

    #[error("cannot find startWith in the record collection: {0}")]
    MissingStartWith(String),
}

/// Failures reported by the registry and document collaborators.
///
/// The engine never lets these escape a page assembly; they are classified
/// into stable [`ResolutionFailure`](crate::ResolutionFailure) messages
/// per record instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The backing index entry for a record could not be read.
    #[error("index entry unreachable: {0}")]
    Index(String),

    /// A pointer-addressed document could not be fetched or parsed.
    #[error("document resolution failed: {0}")]
    Document(String),

    /// Anything the collaborator could not classify further.
    #[error("{0}")]
    Other(String),
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
