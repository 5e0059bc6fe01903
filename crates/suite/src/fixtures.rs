//! Static parameters for scenarios

use std::fmt;

/// (case label, username)
pub const VALID_USERS: &[(&str, &str)] = &[("Fetching posts for user Samantha", "Samantha")];

/// A post id the service has no comments for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidPostId {
    Number(i64),
    Text(&'static str),
}

impl fmt::Display for InvalidPostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidPostId::Number(n) => write!(f, "{n}"),
            InvalidPostId::Text(s) => f.write_str(s),
        }
    }
}

/// (case label, post id)
pub const INVALID_POST_IDS: &[(&str, InvalidPostId)] = &[
    ("Fetching comments for a non-existent post ID", InvalidPostId::Number(9999)),
    ("Fetching comments for an invalid post ID (string)", InvalidPostId::Text("abc")),
    ("Fetching comments for an empty post ID", InvalidPostId::Text("")),
    ("Fetching comments for an arbitrary invalid post ID", InvalidPostId::Text("asdad")),
    ("Fetching comments for less than minimum value for post ID", InvalidPostId::Number(0)),
    ("Fetching comments for a negative value for POST ID", InvalidPostId::Number(-1)),
];
