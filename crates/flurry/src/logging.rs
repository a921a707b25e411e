//! Diagnostics output.
//!
//! The terminal is owned by the UI, so events go to a file or nowhere.

use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use color_eyre::eyre::eyre;
use flurry_config::LogConfig;
use tracing_subscriber::EnvFilter;

/// Install a subscriber writing to the configured log file, if any.
pub fn init(config: &LogConfig) -> color_eyre::Result<()> {
    let Some(path) = &config.file else {
        return Ok(());
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_new(&config.level)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| eyre!(err))?;
    Ok(())
}
