//! Turning a downloaded payload into an executable on disk.
//!
//! The installer is pure local I/O: it never touches the network or the
//! metadata document. Given a payload and the asset file name it came from, it
//! writes exactly one file, `{install_dir}/{binary_name}`:
//!
//! - `.tar.gz` / `.tgz` assets are unpacked and the first entry whose base
//!   name equals the binary name is written (see [`archive`])
//! - anything else is written verbatim
//!
//! # Self-update
//!
//! When the binary being written is puff itself, the running executable is
//! replaced through a `{name}.tmp` sibling and a rename, so the old inode stays
//! valid for the running process. Other binaries are overwritten in place.
//!
//! # Permissions
//!
//! Installed binaries get mode [`BINARY_MODE`] on Unix.

pub mod archive;


use crate::core::{PuffError, Result};
use crate::utils::fs::{atomic_write_with_mode, ensure_dir, write_file_with_mode};
use std::path::{Path, PathBuf};
use tracing::info;

/// Unix permissions of installed binaries: owner and group rwx, nothing for others.
pub const BINARY_MODE: u32 = 0o770;

/// Where and how binaries are written.
#[derive(Debug, Clone)]
pub struct Installer {
    install_dir: PathBuf,
    self_binary_name: String,
}

impl Installer {
    /// Create an installer writing into `install_dir`.
    ///
    /// `self_binary_name` is the file name of puff's own executable; writes to
    /// that name go through an atomic replace.
    pub fn new(install_dir: impl Into<PathBuf>, self_binary_name: impl Into<String>) -> Self {
        Self {
            install_dir: install_dir.into(),
            self_binary_name: self_binary_name.into(),
        }
    }

    /// Installation directory.
    #[must_use]
    pub fn install_dir(&self) -> &Path {
        &self.install_dir
    }

    /// Final path of a binary.
    #[must_use]
    pub fn binary_path(&self, binary_name: &str) -> PathBuf {
        self.install_dir.join(binary_name)
    }

    /// Write `payload` as the executable `binary_name`.
    ///
    /// Returns the path written.
    ///
    /// # Errors
    ///
    /// - [`PuffError::ArchiveError`] / [`PuffError::BinaryNotFoundInArchive`]
    ///   for tarball assets that cannot be unpacked
    /// - [`PuffError::PersistenceError`] if the binary name is unusable or the
    ///   file cannot be written
    pub fn materialize(&self, payload: &[u8], binary_name: &str, asset_name: &str) -> Result<PathBuf> {
        let target = self.checked_target(binary_name)?;

        let extracted;
        let content = if archive::is_tarball(asset_name) {
            extracted = archive::extract_binary(payload, binary_name, asset_name)?;
            extracted.as_slice()
        } else {
            payload
        };

        ensure_dir(&self.install_dir)?;
        if binary_name == self.self_binary_name {
            info!("Replacing own executable at {}", target.display());
            atomic_write_with_mode(&target, content, Some(BINARY_MODE))?;
        } else {
            write_file_with_mode(&target, content, BINARY_MODE)?;
        }

        info!("Wrote {} ({} bytes) from {}", target.display(), content.len(), asset_name);
        Ok(target)
    }

    fn checked_target(&self, binary_name: &str) -> Result<PathBuf> {
        let valid = !binary_name.is_empty()
            && binary_name != "."
            && binary_name != ".."
            && !binary_name.contains(['/', '\\']);
        if valid {
            Ok(self.binary_path(binary_name))
        } else {
            Err(PuffError::persistence(
                "write binary",
                &self.install_dir.join(binary_name),
                "binary name must be a plain file name",
            ))
        }
    }
}
