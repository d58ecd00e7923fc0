//! Configuration: on-disk layout, settings file and the GitHub token.
//!
//! Everything puff persists lives under one config directory:
//!
//! ```text
//! ~/.config/puff/          (or $PUFF_CONFIG_DIR)
//! ├── bin/                 installed binaries
//! ├── metadata.json        installed repositories and versions
//! ├── gh_pat               GitHub personal access token (0600)
//! ├── path_asked           marker: the PATH prompt was answered
//! ├── config.toml          optional settings
//! └── puff.log             log file
//! ```
//!
//! [`Paths`] names these locations from an explicit root so tests can point
//! it at a temporary directory. [`Settings`] holds the few tunables of the
//! optional `config.toml`. [`token`] reads and writes the credential.

pub mod settings;
pub mod token;

pub use settings::Settings;

use crate::constants::{
    BIN_DIR_NAME, CONFIG_DIR_NAME, ENV_CONFIG_DIR, LOG_FILE_NAME, METADATA_FILE_NAME,
    PATH_ASKED_FILE_NAME, SETTINGS_FILE_NAME, TOKEN_FILE_NAME,
};
use crate::core::{PuffError, Result};
use std::path::{Path, PathBuf};

/// Locations inside the config directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    root: PathBuf,
}

impl Paths {
    /// Layout rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
        }
    }

    /// Layout rooted at `$PUFF_CONFIG_DIR`, else `{user config dir}/puff`.
    ///
    /// # Errors
    ///
    /// [`PuffError::ConfigError`] if neither is available.
    pub fn resolve() -> Result<Self> {
        if let Some(dir) = std::env::var_os(ENV_CONFIG_DIR).filter(|d| !d.is_empty()) {
            return Ok(Self::new(dir));
        }
        dirs::config_dir().map(|dir| Self::new(dir.join(CONFIG_DIR_NAME))).ok_or_else(|| {
            PuffError::ConfigError {
                message: format!(
                    "unable to determine the user config directory; set {ENV_CONFIG_DIR}"
                ),
            }
        })
    }

    /// The config directory itself.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory of installed binaries.
    #[must_use]
    pub fn bin_dir(&self) -> PathBuf {
        self.root.join(BIN_DIR_NAME)
    }

    /// Directory holding the metadata document.
    #[must_use]
    pub fn metadata_dir(&self) -> &Path {
        &self.root
    }

    /// The metadata document.
    #[must_use]
    pub fn metadata_file(&self) -> PathBuf {
        self.root.join(METADATA_FILE_NAME)
    }

    /// Token file.
    #[must_use]
    pub fn token_file(&self) -> PathBuf {
        self.root.join(TOKEN_FILE_NAME)
    }

    /// Marker written after the PATH prompt.
    #[must_use]
    pub fn path_asked_marker(&self) -> PathBuf {
        self.root.join(PATH_ASKED_FILE_NAME)
    }

    /// Optional settings file.
    #[must_use]
    pub fn settings_file(&self) -> PathBuf {
        self.root.join(SETTINGS_FILE_NAME)
    }

    /// Log file.
    #[must_use]
    pub fn log_file(&self) -> PathBuf {
        self.root.join(LOG_FILE_NAME)
    }
}
