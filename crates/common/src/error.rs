//! Validation error types

use thiserror::Error;

/// Result type alias for validation checks
pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

/// A payload that does not have the expected shape or content
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Expected a JSON object, got: {0}")]
    NotAnObject(String),

    #[error("Missing '{field}' field in comment {comment}")]
    MissingField { field: String, comment: String },

    #[error("Field '{field}' in comment {comment} has incorrect type. Expected: {expected}, Got: {actual}")]
    WrongType {
        field: String,
        comment: String,
        expected: String,
        actual: String,
    },

    #[error("postId mismatch in comment {comment_id}: expected {expected}, got {actual}")]
    PostIdMismatch {
        comment_id: i64,
        expected: i64,
        actual: i64,
    },

    #[error("Comment id should be positive: {0}")]
    NonPositiveId(i64),

    #[error("Field '{field}' should not be empty in comment {comment_id}")]
    EmptyField { field: String, comment_id: i64 },

    #[error("Invalid email format: {0}")]
    InvalidEmail(String),

    #[error("Duplicate comment ID found: {0}")]
    DuplicateId(i64),

    #[error("Duplicate comment found: {0}")]
    DuplicateComment(i64),
}
