//! Draft persistence error types

use std::io;
use thiserror::Error;

/// Result type for draft operations
pub type Result<T> = std::result::Result<T, DraftError>;

/// Errors that can occur in draft storage
#[derive(Debug, Error)]
pub enum DraftError {
    /// IO error from the storage backend
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    /// Failed to serialize a draft for storage
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
