//! Endpoint registry
//!
//! Every logical operation the suite can perform against the fixture
//! service, with its HTTP method and URL template. Templates name their
//! placeholders in braces, e.g. `{post_id}`.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use reqwest::Method;

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    GetUsers,
    GetUserPosts,
    GetPostComments,
}

impl Endpoint {
    pub const ALL: [Endpoint; 3] = [
        Endpoint::GetUsers,
        Endpoint::GetUserPosts,
        Endpoint::GetPostComments,
    ];

    /// Registry key
    pub fn name(self) -> &'static str {
        match self {
            Endpoint::GetUsers => "GET_USERS",
            Endpoint::GetUserPosts => "GET_USER_POSTS",
            Endpoint::GetPostComments => "GET_POST_COMMENTS",
        }
    }

    pub fn method(self) -> Method {
        match self {
            Endpoint::GetUsers | Endpoint::GetUserPosts | Endpoint::GetPostComments => Method::GET,
        }
    }

    /// Path template relative to the service base URL
    pub fn template(self) -> &'static str {
        match self {
            Endpoint::GetUsers => "/users",
            Endpoint::GetUserPosts => "/users/{user_id}/posts",
            Endpoint::GetPostComments => "/comments?postId={post_id}",
        }
    }

    pub fn placeholders(self) -> &'static [&'static str] {
        match self {
            Endpoint::GetUsers => &[],
            Endpoint::GetUserPosts => &["user_id"],
            Endpoint::GetPostComments => &["post_id"],
        }
    }

    /// Substitute path parameters into the template.
    ///
    /// Missing parameters render as the empty string and values are inserted
    /// verbatim, so malformed input reaches the service unchanged.
    pub fn render(self, params: &PathParams) -> String {
        self.placeholders()
            .iter()
            .fold(self.template().to_string(), |path, name| {
                path.replace(&format!("{{{name}}}"), params.get(name).unwrap_or(""))
            })
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Endpoint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Endpoint::ALL
            .into_iter()
            .find(|endpoint| endpoint.name() == s)
            .ok_or_else(|| Error::UnknownEndpoint(s.to_string()))
    }
}

/// Values for the placeholders of an endpoint template
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams {
    values: BTreeMap<String, String>,
}

impl PathParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl fmt::Display) -> Self {
        self.values.insert(name.into(), value.to_string());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
