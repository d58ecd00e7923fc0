//! File system utilities.
//!
//! - [`atomic_write`] for documents and executables that must never be seen
//!   half written
//! - [`write_file_with_mode`] for plain writes with Unix permissions
//! - [`ensure_dir`] / [`ensure_dir_with_mode`] for the config layout
//!
//! All functions report failures as [`PuffError::PersistenceError`] carrying
//! the path involved.

pub mod atomic;
pub mod dirs;

pub use atomic::{atomic_write, atomic_write_with_mode, temp_sibling};
pub use dirs::{ensure_dir, ensure_dir_with_mode};

use crate::core::{PuffError, Result};
use std::fs;
use std::path::Path;

/// Writes `content` to `path` directly, then applies `mode` on Unix.
///
/// # Errors
///
/// [`PuffError::PersistenceError`] if the write or chmod fails.
pub fn write_file_with_mode(path: &Path, content: &[u8], mode: u32) -> Result<()> {
    fs::write(path, content).map_err(|e| PuffError::persistence("write file", path, e))?;
    set_mode(path, mode)
}

/// Sets Unix permission bits. No-op on other platforms.
///
/// # Errors
///
/// [`PuffError::PersistenceError`] if the permissions cannot be changed.
#[cfg(unix)]
pub fn set_mode(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(mode))
        .map_err(|e| PuffError::persistence("set permissions on", path, e))
}

/// Sets Unix permission bits. No-op on other platforms.
///
/// # Errors
///
/// Never fails on this platform.
#[cfg(not(unix))]
pub fn set_mode(_path: &Path, _mode: u32) -> Result<()> {
    Ok(())
}
