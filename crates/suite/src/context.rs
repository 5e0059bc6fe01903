//! Per-run suite context

use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::SuiteConfig;
use crate::dispatcher::Dispatcher;
use crate::error::Result;
use crate::helper::Helper;
use crate::logging;

/// Everything a scenario needs, built once at process start
pub struct SuiteContext {
    config: SuiteConfig,
    helper: Helper,
    log_path: Option<PathBuf>,
}

impl SuiteContext {
    /// Initialize logging and the HTTP client
    pub fn init(config: SuiteConfig, verbose: bool) -> Result<Self> {
        let log_path = logging::init(&config.log_dir, verbose)?;
        let mut context = Self::without_logging(config)?;
        info!("Logging to {}", log_path.display());
        info!("Fixture service: {}", context.config.base_url);
        context.log_path = Some(log_path);
        Ok(context)
    }

    /// Context that leaves logger setup to the caller
    pub fn without_logging(config: SuiteConfig) -> Result<Self> {
        let dispatcher = Dispatcher::new(config.base_url.clone())?;
        Ok(Self {
            config,
            helper: Helper::new(dispatcher),
            log_path: None,
        })
    }

    pub fn config(&self) -> &SuiteConfig {
        &self.config
    }

    pub fn helper(&self) -> &Helper {
        &self.helper
    }

    pub fn log_path(&self) -> Option<&Path> {
        self.log_path.as_deref()
    }
}
