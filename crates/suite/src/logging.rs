//! Logger setup: console plus a timestamped file

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::Result;

/// File name for a log started now, e.g. `19_10_2026_14_03_59.log`
pub fn log_file_name() -> String {
    chrono::Local::now().format("%d_%m_%Y_%H_%M_%S.log").to_string()
}

/// Install the global subscriber and return the log file path.
///
/// `RUST_LOG` overrides the default level. If a subscriber is already
/// installed it is kept and the new file stays empty.
pub fn init(log_dir: &Path, verbose: bool) -> Result<PathBuf> {
    std::fs::create_dir_all(log_dir)?;
    let path = log_dir.join(log_file_name());
    let file = File::create(&path)?;

    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Arc::new(file)),
        )
        .try_init();

    if installed.is_err() {
        debug!("Logger already initialized, keeping existing subscriber");
    }

    Ok(path)
}
