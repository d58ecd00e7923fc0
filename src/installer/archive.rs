//! Pulling a single binary out of a gzip-compressed tar stream.

use crate::core::{PuffError, Result};
use flate2::read::GzDecoder;
use std::io::Read;
use tar::Archive;
use tracing::debug;

/// Asset file name suffixes treated as gzip-compressed tarballs.
pub const TARBALL_SUFFIXES: &[&str] = &[".tar.gz", ".tgz"];

/// Whether an asset with this file name is a tarball.
#[must_use]
pub fn is_tarball(asset_name: &str) -> bool {
    TARBALL_SUFFIXES.iter().any(|suffix| asset_name.ends_with(suffix))
}

/// Scan a `.tar.gz` payload and return the content of the first entry whose
/// base name equals `binary_name`.
///
/// Entries are visited in stream order and scanning stops at the first
/// match. Directory entries are ignored, so `tool/` does not shadow
/// `tool/tool`.
///
/// # Errors
///
/// - [`PuffError::ArchiveError`] if the gzip or tar data is corrupt
/// - [`PuffError::BinaryNotFoundInArchive`] if no entry matches
pub fn extract_binary(payload: &[u8], binary_name: &str, archive_name: &str) -> Result<Vec<u8>> {
    let corrupt = |e: std::io::Error| PuffError::ArchiveError {
        archive: archive_name.to_string(),
        reason: e.to_string(),
    };

    let mut archive = Archive::new(GzDecoder::new(payload));
    for entry in archive.entries().map_err(corrupt)? {
        let mut entry = entry.map_err(corrupt)?;
        if entry.header().entry_type().is_dir() {
            continue;
        }

        let path = entry.path().map_err(corrupt)?;
        let matches = path.file_name().is_some_and(|name| name == binary_name);
        if !matches {
            continue;
        }

        debug!("Found {} in {} at {}", binary_name, archive_name, path.display());
        let mut content = Vec::with_capacity(usize::try_from(entry.size()).unwrap_or(0));
        entry.read_to_end(&mut content).map_err(corrupt)?;
        return Ok(content);
    }

    Err(PuffError::BinaryNotFoundInArchive {
        binary: binary_name.to_string(),
        archive: archive_name.to_string(),
    })
}
