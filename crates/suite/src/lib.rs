//! restprobe API suite
//!
//! Exercises a users/posts/comments REST fixture service and validates
//! what it returns.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  TestRunner                                                 │
//! │    ├── run_all() / run_tagged(tag) / run_test(name)         │
//! │    └── write_results() -> test-results.json                 │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Scenario (one test body) ── SuiteContext (config, logger)  │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Helper                                                     │
//! │    ├── get_user(expected, &UserFilter)                      │
//! │    ├── get_user_posts(user_id, expected)                    │
//! │    ├── get_post_comments(post_id, expected)                 │
//! │    └── get_user_with_posts(expected, &UserFilter)           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Dispatcher::dispatch(Endpoint, &PathParams, headers)       │
//! │  Endpoint { GET_USERS, GET_USER_POSTS, GET_POST_COMMENTS }  │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod context;
pub mod dispatcher;
pub mod endpoint;
pub mod error;
pub mod filter;
pub mod fixtures;
pub mod helper;
pub mod logging;
pub mod runner;
pub mod scenario;

pub use config::SuiteConfig;
pub use context::SuiteContext;
pub use dispatcher::{ApiResponse, Dispatcher};
pub use endpoint::{Endpoint, PathParams};
pub use error::{Error, Result};
pub use filter::UserFilter;
pub use helper::Helper;
pub use runner::TestRunner;
pub use scenario::{Scenario, Tag, TestCase};
