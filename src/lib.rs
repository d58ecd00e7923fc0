//! puff - a small installer for binaries published on GitHub Releases
//!
//! puff downloads the latest release asset of a repository, extracts the
//! binary if the asset is a `.tar.gz`, puts it in its own bin directory and
//! records the installed version so every binary can later be updated with
//! one command. It is meant for single-binary tools that are easier to
//! download than to build, without going through a system package manager.
//!
//! # Architecture Overview
//!
//! ```text
//!   cli ──> orchestrator ──┬──> github      (resolve latest release, download asset)
//!                          ├──> installer   (unpack, write executable)
//!                          └──> metadata    (metadata.json)
//! ```
//!
//! - **Catalog repositories** ship with a built-in asset pattern and install
//!   without questions.
//! - **Free-form repositories** ask once for parts of the asset name; the
//!   answer is stored and reused by `puff update`.
//! - Versions are compared for equality only: a different tag is an update.
//! - Metadata is written only after the binary is on disk, so a failed
//!   download never leaves a repository recorded at a version it does not have.
//!
//! # Core Modules
//!
//! - [`catalog`] - Repository references and the featured repository table
//! - [`github`] - Release resolution, asset selection and download
//! - [`installer`] - Archive extraction and binary writes
//! - [`metadata`] - The installation metadata document
//! - [`orchestrator`] - Install, update and remove flows
//!
//! ## Supporting Modules
//!
//! - [`cli`] - Command-line interface and first-run setup
//! - [`config`] - Directory layout, settings and token storage
//! - [`constants`] - File names, environment variables and defaults
//! - [`core`] - Error types and user-facing error reporting
//! - [`utils`] - Atomic writes, permissions and progress bars
//!
//! # Command-Line Usage
//!
//! ```bash
//! # Featured repositories
//! puff list
//!
//! # Install a featured repository, then any other one
//! puff add pgulb/plasma
//! puff add junegunn/fzf
//!
//! # What is installed
//! puff list --installed
//!
//! # Update everything
//! puff update
//!
//! # Remove without confirmation prompts
//! puff remove junegunn/fzf --yes
//! ```
//!
//! # Files
//!
//! Everything lives under `~/.config/puff` (or `$PUFF_CONFIG_DIR`): installed
//! binaries in `bin/`, the version record in `metadata.json`, an optional
//! GitHub token in `gh_pat` and the log in `puff.log`.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod github;
pub mod installer;
pub mod metadata;
pub mod orchestrator;
pub mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
