//! Directory creation helpers.

use crate::core::{PuffError, Result};
use std::fs;
use std::path::Path;

/// Ensures a directory exists, creating it and its parents if needed.
///
/// # Errors
///
/// [`PuffError::PersistenceError`] if creation fails or the path exists but
/// is not a directory.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(|e| PuffError::persistence("create directory", path, e))?;
    } else if !path.is_dir() {
        return Err(PuffError::persistence(
            "create directory",
            path,
            "path exists but is not a directory",
        ));
    }
    Ok(())
}

/// Ensures a directory exists with the given Unix permission bits.
///
/// Permissions are only applied when the directory is created here; an
/// existing directory keeps whatever mode the user gave it.
///
/// # Errors
///
/// [`PuffError::PersistenceError`] on failure.
pub fn ensure_dir_with_mode(path: &Path, mode: u32) -> Result<()> {
    let existed = path.is_dir();
    ensure_dir(path)?;
    if !existed {
        super::set_mode(path, mode)?;
    }
    Ok(())
}
