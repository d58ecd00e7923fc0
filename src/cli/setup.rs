//! First-run setup of the config directory.
//!
//! Runs before every command and is idempotent. Interactive questions are
//! only asked when stdin is a terminal, so scripts and CI never block:
//!
//! 1. create the config directory
//! 2. ask for a GitHub token if none was ever stored
//! 3. create `bin/`
//! 4. offer once to append the bin directory to `PATH` in shell rc files
//! 5. create an empty `metadata.json`

use super::common::{confirm, prompt_line};
use crate::config::{Paths, token};
use crate::constants::{ENV_GITHUB_TOKEN, SHELL_RC_FILES};
use crate::metadata::InstallState;
use crate::utils::fs::{ensure_dir_with_mode, write_file_with_mode};
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use tracing::{info, warn};

/// Permissions of the config and bin directories on Unix.
pub const DIR_MODE: u32 = 0o750;

/// Create the config directory. Runs before logging is set up.
///
/// Returns `true` if the directory did not exist before.
///
/// # Errors
///
/// Fails if the directory cannot be created.
pub fn prepare_config_dir(paths: &Paths) -> Result<bool> {
    let created = !paths.root().exists();
    ensure_dir_with_mode(paths.root(), DIR_MODE)?;
    Ok(created)
}

/// Everything after the config directory exists.
///
/// # Errors
///
/// Fails if a file of the layout cannot be written or a prompt cannot read
/// stdin.
pub async fn bootstrap(paths: &Paths, interactive: bool) -> Result<()> {
    if interactive && needs_token_prompt(paths) {
        ask_for_token(paths).await?;
    }

    let bin_dir = paths.bin_dir();
    if !bin_dir.exists() {
        ensure_dir_with_mode(&bin_dir, DIR_MODE)?;
        info!("Created bin directory {}", bin_dir.display());
    }

    if interactive && !paths.path_asked_marker().exists() {
        match dirs::home_dir() {
            Some(home) => offer_path_export(paths, &home).await?,
            None => warn!("Home directory unknown, not offering to edit shell rc files"),
        }
    }

    if InstallState::ensure_skeleton(paths.metadata_dir())? {
        info!("Created {}", paths.metadata_file().display());
    }
    Ok(())
}

/// A token is asked for once: when no token file exists and none is given
/// through the environment.
fn needs_token_prompt(paths: &Paths) -> bool {
    let from_env = std::env::var(ENV_GITHUB_TOKEN).is_ok_and(|t| !t.trim().is_empty());
    !from_env && !paths.token_file().exists()
}

async fn ask_for_token(paths: &Paths) -> Result<()> {
    let answer = prompt_line("Enter your GitHub personal access token (empty for anonymous access): ")
        .await?
        .unwrap_or_default();

    // Stored even when empty so the question is not repeated.
    token::write_token_file(&paths.token_file(), &answer).await?;
    info!("Token written to {}", paths.token_file().display());
    Ok(())
}

/// Line appended to shell rc files.
#[must_use]
pub fn path_export_line(bin_dir: &Path) -> String {
    format!("export PATH=$PATH:{}", bin_dir.display())
}

async fn offer_path_export(paths: &Paths, home: &Path) -> Result<()> {
    let line = path_export_line(&paths.bin_dir());

    for rc_name in SHELL_RC_FILES {
        let rc_file = home.join(rc_name);
        if !rc_file.exists() {
            continue;
        }
        if confirm(&format!("Add puff bin directory to PATH in ~/{rc_name}?")).await? {
            append_line(&rc_file, &line)?;
            info!("Added bin directory to PATH in {}", rc_file.display());
        }
    }

    mark_path_asked(paths)
}

/// Append `line` to an existing rc file.
///
/// # Errors
///
/// Fails if the file cannot be opened for appending.
pub fn append_line(rc_file: &Path, line: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .append(true)
        .open(rc_file)
        .with_context(|| format!("Failed to open {}", rc_file.display()))?;
    writeln!(file, "{line}").with_context(|| format!("Failed to write {}", rc_file.display()))
}

/// Record that the PATH question was answered.
///
/// # Errors
///
/// Fails if the marker cannot be written.
pub fn mark_path_asked(paths: &Paths) -> Result<()> {
    write_file_with_mode(&paths.path_asked_marker(), b"", 0o600)?;
    Ok(())
}
