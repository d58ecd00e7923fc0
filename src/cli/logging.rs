//! File logging for the CLI.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Send `tracing` output to `log_file`, appending.
///
/// `RUST_LOG` wins over `level`; with neither, `info` is used. Calling this
/// twice in one process keeps the first subscriber.
///
/// # Errors
///
/// Fails if the log file cannot be opened.
pub fn init(log_file: &Path, level: Option<&str>) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("Failed to open log file {}", log_file.display()))?;

    let filter = match std::env::var("RUST_LOG") {
        Ok(_) => EnvFilter::from_default_env(),
        Err(_) => EnvFilter::new(level.unwrap_or("info")),
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init();

    tracing::info!("puff {} started: {:?}", crate::constants::TOOL_VERSION, std::env::args().collect::<Vec<_>>());
    Ok(())
}
