//! Installation metadata store.
//!
//! Records which repositories are installed and at which version, in a single
//! JSON document at `{dir}/metadata.json`:
//!
//! ```json
//! {
//!   "metadata": [
//!     {"path": "pgulb/plasma", "version": "v0.4.1"},
//!     {"path": "owner/tool", "version": "v1.2.0", "name_fragments": ["linux", "amd64"]}
//!   ]
//! }
//! ```
//!
//! `name_fragments` is stored only for free-form repositories, so that later
//! updates select the same kind of asset without asking again. Catalog
//! repositories re-derive their asset from the built-in pattern. The older
//! `name_parts` spelling is accepted when reading.
//!
//! Entries keep insertion order and each repository path appears at most
//! once. The document is always rewritten whole via an atomic rename.

use crate::catalog::RepoRef;
use crate::constants::METADATA_FILE_NAME;
use crate::core::{PuffError, Result};
use crate::github::Release;
use crate::utils::fs::atomic_write;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One installed repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstalledEntry {
    /// Repository path, `owner/name`; unique within the document
    pub path: String,
    /// Installed release tag
    pub version: String,
    /// Fragments used to pick the asset; empty for catalog repositories
    #[serde(default, alias = "name_parts", skip_serializing_if = "Vec::is_empty")]
    pub name_fragments: Vec<String>,
}

/// Result of [`InstallState::upsert`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// The repository was not recorded before
    Inserted,
    /// The stored version was replaced
    Updated {
        /// Version recorded before the update
        previous: String,
    },
    /// The stored version already equals the resolved one
    Unchanged,
}

impl UpsertOutcome {
    /// Whether the state differs from before, i.e. a download is needed.
    #[must_use]
    pub fn changed(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// The whole installation state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallState {
    #[serde(default)]
    metadata: Vec<InstalledEntry>,
}

impl InstallState {
    /// Path of the metadata document inside `dir`.
    #[must_use]
    pub fn file_path(dir: &Path) -> PathBuf {
        dir.join(METADATA_FILE_NAME)
    }

    /// Load the document from `dir`.
    ///
    /// # Errors
    ///
    /// [`PuffError::PersistenceError`] if the file is missing, unreadable or
    /// not a valid metadata document. Setup creates an empty document, so a
    /// missing file here means the config directory is broken.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = Self::file_path(dir);
        let content =
            fs::read(&path).map_err(|e| PuffError::persistence("read metadata", &path, e))?;
        let state: Self = serde_json::from_slice(&content)
            .map_err(|e| PuffError::persistence("parse metadata", &path, e))?;
        debug!("Loaded {} installed entries from {}", state.metadata.len(), path.display());
        Ok(state)
    }

    /// Write the document to `dir` atomically.
    ///
    /// # Errors
    ///
    /// [`PuffError::PersistenceError`] if serialization or the write fails.
    pub fn save(&self, dir: &Path) -> Result<()> {
        let path = Self::file_path(dir);
        let mut content = serde_json::to_vec_pretty(self)
            .map_err(|e| PuffError::persistence("serialize metadata", &path, e))?;
        content.push(b'\n');
        atomic_write(&path, &content)?;
        debug!("Saved {} installed entries to {}", self.metadata.len(), path.display());
        Ok(())
    }

    /// Create an empty document in `dir` unless one exists.
    ///
    /// Returns `true` if a new document was written.
    ///
    /// # Errors
    ///
    /// [`PuffError::PersistenceError`] if the write fails.
    pub fn ensure_skeleton(dir: &Path) -> Result<bool> {
        if Self::file_path(dir).exists() {
            return Ok(false);
        }
        Self::default().save(dir)?;
        Ok(true)
    }

    /// Record `release` for `repo`.
    ///
    /// - absent: inserted with `fragments`
    /// - same version: nothing changes
    /// - different version: version replaced in place, stored fragments kept
    pub fn upsert(&mut self, repo: &RepoRef, release: &Release, fragments: &[String]) -> UpsertOutcome {
        match self.metadata.iter_mut().find(|e| e.path == repo.path()) {
            Some(entry) if entry.version == release.version => UpsertOutcome::Unchanged,
            Some(entry) => {
                let previous = std::mem::replace(&mut entry.version, release.version.clone());
                UpsertOutcome::Updated {
                    previous,
                }
            }
            None => {
                self.metadata.push(InstalledEntry {
                    path: repo.path().to_string(),
                    version: release.version.clone(),
                    name_fragments: fragments.to_vec(),
                });
                UpsertOutcome::Inserted
            }
        }
    }

    /// Look up an entry by exact repository path.
    #[must_use]
    pub fn find(&self, path: &str) -> Option<&InstalledEntry> {
        self.metadata.iter().find(|e| e.path == path)
    }

    /// Drop an entry, returning it if it existed.
    pub fn remove(&mut self, path: &str) -> Option<InstalledEntry> {
        let index = self.metadata.iter().position(|e| e.path == path)?;
        Some(self.metadata.remove(index))
    }

    /// All entries in stored order.
    #[must_use]
    pub fn entries(&self) -> &[InstalledEntry] {
        &self.metadata
    }

    /// Number of installed repositories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.metadata.len()
    }

    /// Whether nothing is installed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.metadata.is_empty()
    }
}
