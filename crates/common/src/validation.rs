//! Response payload validation
//!
//! Comments arrive as raw JSON first. [`check_structure`] runs on the raw
//! value so that a missing or mistyped field is reported by name instead of
//! as an opaque deserialization failure. Everything after that works on
//! typed [`Comment`]s.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::error::{ValidationError, ValidationResult};
use crate::types::Comment;
use crate::EMAIL_PATTERN;

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern compiles"));

/// JSON type a required field must have
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonKind {
    Integer,
    String,
}

impl JsonKind {
    pub fn matches(self, value: &Value) -> bool {
        match self {
            JsonKind::Integer => value.is_i64(),
            JsonKind::String => value.is_string(),
        }
    }

    fn name(self) -> &'static str {
        match self {
            JsonKind::Integer => "int",
            JsonKind::String => "str",
        }
    }
}

/// Required comment fields and their JSON types
pub const COMMENT_STRUCTURE: [(&str, JsonKind); 5] = [
    ("id", JsonKind::Integer),
    ("postId", JsonKind::Integer),
    ("name", JsonKind::String),
    ("email", JsonKind::String),
    ("body", JsonKind::String),
];

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

/// Required fields absent from a raw comment
pub fn missing_fields(value: &Value) -> Vec<&'static str> {
    COMMENT_STRUCTURE
        .iter()
        .filter(|(field, _)| value.get(field).is_none())
        .map(|(field, _)| *field)
        .collect()
}

/// Check that a raw comment carries every required field with the right type
pub fn check_structure(value: &Value) -> ValidationResult<()> {
    let object = value
        .as_object()
        .ok_or_else(|| ValidationError::NotAnObject(value.to_string()))?;

    for (field, kind) in COMMENT_STRUCTURE {
        let Some(found) = object.get(field) else {
            return Err(ValidationError::MissingField {
                field: field.to_string(),
                comment: value.to_string(),
            });
        };
        if !kind.matches(found) {
            return Err(ValidationError::WrongType {
                field: field.to_string(),
                comment: value.to_string(),
                expected: kind.name().to_string(),
                actual: kind_of(found).to_string(),
            });
        }
    }

    Ok(())
}

/// The comment must belong to the post it was requested for
pub fn check_post_ownership(comment: &Comment, post_id: i64) -> ValidationResult<()> {
    if comment.post_id != post_id {
        return Err(ValidationError::PostIdMismatch {
            comment_id: comment.id,
            expected: post_id,
            actual: comment.post_id,
        });
    }
    Ok(())
}

/// Ownership, a positive id, and non-blank text fields
pub fn check_values(comment: &Comment, post_id: i64) -> ValidationResult<()> {
    check_post_ownership(comment, post_id)?;

    if comment.id <= 0 {
        return Err(ValidationError::NonPositiveId(comment.id));
    }

    for (field, text) in [
        ("name", &comment.name),
        ("email", &comment.email),
        ("body", &comment.body),
    ] {
        if text.trim().is_empty() {
            return Err(ValidationError::EmptyField {
                field: field.to_string(),
                comment_id: comment.id,
            });
        }
    }

    Ok(())
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

pub fn check_email(comment: &Comment) -> ValidationResult<()> {
    if !is_valid_email(&comment.email) {
        return Err(ValidationError::InvalidEmail(comment.email.clone()));
    }
    Ok(())
}

/// Comment ids must be pairwise distinct within one post's result set
pub fn check_unique_ids(comments: &[Comment]) -> ValidationResult<()> {
    let mut seen = HashSet::with_capacity(comments.len());
    for comment in comments {
        if !seen.insert(comment.id) {
            return Err(ValidationError::DuplicateId(comment.id));
        }
    }
    Ok(())
}

/// No two comments may be identical across every required field
pub fn check_no_duplicates(comments: &[Comment]) -> ValidationResult<()> {
    let mut seen = HashSet::with_capacity(comments.len());
    for comment in comments {
        if !seen.insert(comment.fingerprint()) {
            return Err(ValidationError::DuplicateComment(comment.id));
        }
    }
    Ok(())
}

/// Every per-comment and per-set check for the comments of one post
pub fn check_comment_set(comments: &[Comment], post_id: i64) -> ValidationResult<()> {
    for comment in comments {
        check_values(comment, post_id)?;
        check_email(comment)?;
    }
    check_unique_ids(comments)?;
    check_no_duplicates(comments)
}
