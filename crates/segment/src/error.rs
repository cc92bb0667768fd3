//! Segmentation error types

use thiserror::Error;

/// Errors from strict string parsing of rule vocabulary.
///
/// Normalization never produces these - they exist for UI plumbing that
/// parses dropdown/query-string values and wants to reject bad input.
#[derive(Debug, Error)]
pub enum SegmentError {
    /// Unknown logic connector
    #[error("unknown logic: {0}")]
    UnknownLogic(String),

    /// Unknown customer attribute
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// Unknown filter operator
    #[error("unknown operator: {0}")]
    UnknownOperator(String),
}

/// Result type for segmentation operations
pub type Result<T> = std::result::Result<T, SegmentError>;
