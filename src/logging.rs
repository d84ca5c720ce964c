//! Logging setup
//!
//! The terminal belongs to the TUI, so log lines go to a file in the data
//! directory. `RUST_LOG` overrides the default `info` filter.

use crate::{ExploreError, Result, APP_NAME, LOG_FILE};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Uses $DATA_HOME/explore-keys/explore-keys.log
pub fn log_file_path() -> Result<PathBuf> {
    let data_dir = dirs::data_dir().ok_or_else(|| {
        ExploreError::ConfigError("Unable to determine data directory".to_string())
    })?;

    Ok(data_dir.join(APP_NAME).join(LOG_FILE))
}

/// Install the global subscriber, appending to `path`
pub fn init_logging(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| ExploreError::ConfigError(format!("Failed to initialize logging: {}", e)))?;

    tracing::info!("{} {} starting", APP_NAME, env!("CARGO_PKG_VERSION"));
    Ok(())
}
