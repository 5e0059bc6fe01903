//! Error types for the API suite

use restprobe_common::ValidationError;
use thiserror::Error;

use crate::endpoint::Endpoint;

#[derive(Error, Debug)]
pub enum Error {
    /// A logical operation name that is not in the registry
    #[error("Invalid endpoint key: {0}")]
    UnknownEndpoint(String),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected status for {endpoint}: expected {expected}, got {actual}")]
    UnexpectedStatus {
        endpoint: Endpoint,
        expected: u16,
        actual: u16,
    },

    #[error("Empty result: {0}")]
    EmptyResult(String),

    #[error("No user found matching criteria: {0}")]
    UserNotFound(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Assertion failed: {0}")]
    Assertion(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Errors caused by setup rather than by the service under test
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::UnknownEndpoint(_) | Error::Config(_) | Error::Toml(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
