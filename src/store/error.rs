//! Error types for the document store.

use thiserror::Error;

/// Errors that can occur while talking to the document store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached or refused the operation.
    #[error("Document store unavailable: {0}")]
    Unavailable(String),

    /// A document path with an empty collection or id.
    #[error("Invalid document path: {0}")]
    InvalidPath(String),

    /// A document could not be encoded or decoded.
    #[error("Document serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
