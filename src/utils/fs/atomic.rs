//! Atomic file write operations using temp-and-rename strategy.
//!
//! Used for the metadata document and for replacing puff's own executable,
//! which may be running while it is overwritten.

use super::dirs::ensure_dir;
use crate::core::{PuffError, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Temporary sibling used while writing `path`: the file name plus `.tmp`.
#[must_use]
pub fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Atomically writes bytes to a file using a write-then-rename strategy.
///
/// 1. Write content to `{name}.tmp` next to the target
/// 2. Sync the temporary file to disk
/// 3. Rename it over the target
///
/// Readers never see a partially written file. Parent directories are
/// created when missing.
///
/// # Errors
///
/// [`PuffError::PersistenceError`] if any step fails. The temporary file is
/// removed on failure.
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    atomic_write_with_mode(path, content, None)
}

/// Like [`atomic_write`], additionally setting Unix permission bits on the
/// temporary file before it is renamed into place.
///
/// # Errors
///
/// [`PuffError::PersistenceError`] if any step fails.
pub fn atomic_write_with_mode(path: &Path, content: &[u8], mode: Option<u32>) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_dir(parent)?;
        }
    }

    let temp_path = temp_sibling(path);
    let result = write_temp(&temp_path, content, mode).and_then(|()| {
        fs::rename(&temp_path, path)
            .map_err(|e| PuffError::persistence("rename temp file to", path, e))
    });

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

fn write_temp(temp_path: &Path, content: &[u8], mode: Option<u32>) -> Result<()> {
    let mut file = fs::File::create(temp_path)
        .map_err(|e| PuffError::persistence("create temp file", temp_path, e))?;

    file.write_all(content)
        .map_err(|e| PuffError::persistence("write temp file", temp_path, e))?;

    file.sync_all().map_err(|e| PuffError::persistence("sync temp file", temp_path, e))?;

    if let Some(mode) = mode {
        super::set_mode(temp_path, mode)?;
    }
    Ok(())
}
