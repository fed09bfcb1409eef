//! Log initialisation
//!
//! The terminal belongs to the UI, so logs go to a file. `TUITTER_LOG`
//! overrides the configured filter (`TUITTER_LOG=debug`, `TUITTER_LOG=tuitter::core=trace`).

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive
pub const LOG_ENV: &str = "TUITTER_LOG";

/// Default log file (`<data dir>/tuitter/tuitter.log`)
pub fn default_log_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("tuitter").join("tuitter.log"))
}

/// Build the filter from `TUITTER_LOG`, falling back to `level`
pub fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber writing to `path`.
///
/// Failure to open the file leaves logging disabled; the UI still runs.
pub fn init(path: &Path, level: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(build_filter(level))
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow::anyhow!("logging already initialised: {}", e))?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "tuitter starting");
    Ok(())
}
