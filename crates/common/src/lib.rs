//! restprobe Common Library
//!
//! Fixture-service models, HTTP status vocabulary, and the response
//! validation rules shared by the restprobe suite.

pub mod error;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use error::{ValidationError, ValidationResult};
pub use types::*;

/// restprobe version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default base URL of the fixture service
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// Pattern every comment email must match
pub const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9-.]+$";
