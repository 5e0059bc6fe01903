//! Suite configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use restprobe_common::DEFAULT_BASE_URL;

use crate::error::Result;

/// Suite configuration, optionally loaded from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
    /// Base URL of the fixture service
    pub base_url: String,

    /// Directory for timestamped log files
    pub log_dir: PathBuf,

    /// Directory for the JSON result report
    pub output_dir: PathBuf,

    /// Upper bound for a single comments request
    pub response_time_budget_ms: u64,

    /// A user's posts must carry more comments than this in total
    pub large_response_min_comments: usize,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            log_dir: PathBuf::from("output"),
            output_dir: PathBuf::from("test-results"),
            response_time_budget_ms: 500,
            large_response_min_comments: 10,
        }
    }
}

impl SuiteConfig {
    pub fn from_toml(toml: &str) -> Result<Self> {
        Ok(toml::from_str(toml)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn response_time_budget(&self) -> Duration {
        Duration::from_millis(self.response_time_budget_ms)
    }
}
