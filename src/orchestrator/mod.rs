//! Install, update and remove flows.
//!
//! The [`Orchestrator`] composes the release client, the [`Installer`] and the
//! metadata store. Each repository goes through its steps strictly in order:
//!
//! 1. load the metadata document
//! 2. resolve the latest release and choose an asset
//! 3. stage the metadata change in memory
//! 4. if the version changed, download and write the binary
//! 5. save the metadata document
//!
//! The document is only written after the binary is in place. When resolving,
//! downloading or writing fails, the metadata on disk is exactly what it was
//! before the call.
//!
//! # Catalog vs free-form
//!
//! Paths found in the [`Catalog`] pick their asset with the built-in pattern.
//! Any other path is free-form: the first install asks the [`FragmentSource`]
//! for name fragments and stores them, later updates reuse the stored ones.

pub mod prompt;

pub use prompt::{AssumeYes, FragmentSource, NoFragments, RemovalConfirmer, parse_fragments};

use crate::catalog::{Catalog, RepoRef};
use crate::core::{PuffError, Result};
use crate::github::{Release, ReleaseClient, select_by_fragments};
use crate::installer::Installer;
use crate::metadata::{InstallState, UpsertOutcome};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Immutable inputs of an [`Orchestrator`].
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Featured repositories
    pub catalog: Catalog,
    /// Where binaries are written
    pub install_dir: PathBuf,
    /// Directory holding `metadata.json`
    pub metadata_dir: PathBuf,
    /// File name of puff's own executable
    pub self_binary_name: String,
}

/// What an install did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// First install of this repository
    Installed {
        /// Installed release tag
        version: String,
    },
    /// A different release replaced the installed one
    Updated {
        /// Tag installed before
        previous: String,
        /// Tag installed now
        version: String,
    },
    /// The installed tag is already the latest; nothing was downloaded
    AlreadyCurrent {
        /// Installed release tag
        version: String,
    },
    /// The latest release has no assets
    NothingToInstall,
}

/// What a removal did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// Every matching file was deleted and the entry dropped
    Removed {
        /// Deleted files
        files: Vec<PathBuf>,
    },
    /// A deletion was declined; the entry is kept
    Skipped {
        /// The file the user declined to delete
        declined: PathBuf,
        /// Files deleted before the refusal
        removed: Vec<PathBuf>,
    },
    /// The repository is not recorded as installed
    NotInstalled,
}

/// Per-repository results of a batch operation, in processing order.
pub type BatchReport = Vec<(String, Result<InstallOutcome>)>;

/// Runs install, update and remove against one config directory.
#[derive(Debug)]
pub struct Orchestrator<F, C> {
    config: OrchestratorConfig,
    client: ReleaseClient,
    installer: Installer,
    fragments: F,
    confirmer: C,
}

impl<F: FragmentSource, C: RemovalConfirmer> Orchestrator<F, C> {
    /// Create an orchestrator.
    pub fn new(config: OrchestratorConfig, client: ReleaseClient, fragments: F, confirmer: C) -> Self {
        let installer = Installer::new(&config.install_dir, config.self_binary_name.clone());
        Self {
            config,
            client,
            installer,
            fragments,
            confirmer,
        }
    }

    /// Install or update one repository.
    ///
    /// # Errors
    ///
    /// Any error of the resolve, select, fetch, materialize or save steps.
    /// On error the metadata document is left untouched.
    pub async fn install(&mut self, path: &str) -> Result<InstallOutcome> {
        let repo = RepoRef::parse(path)?;
        let mut state = InstallState::load(&self.config.metadata_dir)?;

        let Some((release, fragments)) = self.resolve(&repo, &state).await? else {
            info!("{} has no release assets, nothing to install", repo);
            return Ok(InstallOutcome::NothingToInstall);
        };

        let staged = state.upsert(&repo, &release, &fragments);
        if !staged.changed() {
            info!("{} is already at {}", repo, release.version);
            return Ok(InstallOutcome::AlreadyCurrent {
                version: release.version,
            });
        }

        let payload = self.client.fetch(&release.download_url).await?;
        self.installer.materialize(&payload, repo.binary_name(), &release.asset_name)?;
        state.save(&self.config.metadata_dir)?;

        Ok(match staged {
            UpsertOutcome::Updated { previous } => {
                info!("Updated {} from {} to {}", repo, previous, release.version);
                InstallOutcome::Updated {
                    previous,
                    version: release.version,
                }
            }
            _ => {
                info!("Installed {} {}", repo, release.version);
                InstallOutcome::Installed {
                    version: release.version,
                }
            }
        })
    }

    /// Install several repositories, continuing past failures.
    pub async fn install_all(&mut self, paths: &[String]) -> BatchReport {
        let mut report = Vec::with_capacity(paths.len());
        for path in paths {
            let result = self.install(path).await;
            if let Err(e) = &result {
                warn!("Install of {} failed: {}", path, e);
            }
            report.push((path.clone(), result));
        }
        report
    }

    /// Re-run the install flow for every installed repository, in stored order.
    ///
    /// # Errors
    ///
    /// Only if the metadata document cannot be loaded; per-repository failures
    /// are reported in the returned list.
    pub async fn update_all(&mut self) -> Result<BatchReport> {
        let paths: Vec<String> = InstallState::load(&self.config.metadata_dir)?
            .entries()
            .iter()
            .map(|e| e.path.clone())
            .collect();

        info!("Checking {} installed repositories for updates", paths.len());
        Ok(self.install_all(&paths).await)
    }

    /// Remove an installed repository.
    ///
    /// Every file in the install directory whose name contains the binary name
    /// is offered to the [`RemovalConfirmer`] and deleted if confirmed. The
    /// first refusal stops the removal and keeps the metadata entry.
    ///
    /// # Errors
    ///
    /// [`PuffError::PersistenceError`] if a file cannot be deleted or the
    /// metadata cannot be read or written, or any confirmer error.
    pub async fn remove(&mut self, path: &str) -> Result<RemoveOutcome> {
        let repo = RepoRef::parse(path)?;
        let mut state = InstallState::load(&self.config.metadata_dir)?;

        if state.find(repo.path()).is_none() {
            return Ok(RemoveOutcome::NotInstalled);
        }

        let mut removed = Vec::new();
        for file in matching_files(&self.config.install_dir, repo.binary_name())? {
            if !self.confirmer.confirm(&repo, &file).await? {
                warn!("Removal of {} declined at {}, keeping metadata entry", repo, file.display());
                return Ok(RemoveOutcome::Skipped {
                    declined: file,
                    removed,
                });
            }
            fs::remove_file(&file).map_err(|e| PuffError::persistence("remove binary", &file, e))?;
            info!("Deleted {}", file.display());
            removed.push(file);
        }

        state.remove(repo.path());
        state.save(&self.config.metadata_dir)?;
        info!("Removed {}", repo);
        Ok(RemoveOutcome::Removed {
            files: removed,
        })
    }

    async fn resolve(
        &mut self,
        repo: &RepoRef,
        state: &InstallState,
    ) -> Result<Option<(Release, Vec<String>)>> {
        if let Some(entry) = self.config.catalog.find(repo.path()) {
            let release = self.client.resolve_catalog(entry).await?;
            return Ok(Some((release, Vec::new())));
        }

        let latest = self.client.resolve_freeform(repo).await?;
        if latest.assets.is_empty() {
            return Ok(None);
        }

        let fragments = match state.find(repo.path()) {
            Some(entry) => entry.name_fragments.clone(),
            None => self.fragments.fragments(repo, &latest.asset_names()).await?,
        };
        let asset = select_by_fragments(repo.path(), &latest.assets, &fragments)?;
        Ok(Some((latest.release_for(asset), fragments)))
    }
}

/// Files directly inside `dir` whose name contains `needle`, sorted by path.
///
/// A missing directory has no matching files.
///
/// # Errors
///
/// [`PuffError::PersistenceError`] if the directory cannot be listed.
pub fn matching_files(dir: &Path, needle: &str) -> Result<Vec<PathBuf>> {
    let listing = match fs::read_dir(dir) {
        Ok(listing) => listing,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(PuffError::persistence("list directory", dir, e)),
    };

    let mut files = Vec::new();
    for entry in listing {
        let entry = entry.map_err(|e| PuffError::persistence("list directory", dir, e))?;
        let is_file = entry.file_type().is_ok_and(|t| t.is_file() || t.is_symlink());
        if is_file && entry.file_name().to_string_lossy().contains(needle) {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}
