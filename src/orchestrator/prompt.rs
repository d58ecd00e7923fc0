//! User interaction needed by the orchestrator.
//!
//! The orchestrator never reads the terminal itself. Two collaborators are
//! injected instead, so the CLI can prompt on stdin while tests script the
//! answers.

use crate::catalog::RepoRef;
use crate::core::Result;
use std::path::Path;

/// Supplies name fragments for a free-form repository on first install.
#[allow(async_fn_in_trait)]
pub trait FragmentSource {
    /// Return the fragments that the chosen asset name must contain.
    ///
    /// `asset_names` lists every asset of the latest release, in API order.
    /// An empty result selects the first asset.
    async fn fragments(&mut self, repo: &RepoRef, asset_names: &[&str]) -> Result<Vec<String>>;
}

/// Decides whether an installed file may be deleted.
#[allow(async_fn_in_trait)]
pub trait RemovalConfirmer {
    /// `true` to delete `file`, `false` to stop the removal.
    async fn confirm(&mut self, repo: &RepoRef, file: &Path) -> Result<bool>;
}

impl<T: FragmentSource + ?Sized> FragmentSource for &mut T {
    async fn fragments(&mut self, repo: &RepoRef, asset_names: &[&str]) -> Result<Vec<String>> {
        (**self).fragments(repo, asset_names).await
    }
}

impl<T: RemovalConfirmer + ?Sized> RemovalConfirmer for &mut T {
    async fn confirm(&mut self, repo: &RepoRef, file: &Path) -> Result<bool> {
        (**self).confirm(repo, file).await
    }
}

/// Confirms every removal without asking. Backs `puff remove --yes`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl RemovalConfirmer for AssumeYes {
    async fn confirm(&mut self, _repo: &RepoRef, _file: &Path) -> Result<bool> {
        Ok(true)
    }
}

/// Never asks for fragments; every free-form install picks the first asset.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFragments;

impl FragmentSource for NoFragments {
    async fn fragments(&mut self, _repo: &RepoRef, _asset_names: &[&str]) -> Result<Vec<String>> {
        Ok(Vec::new())
    }
}

/// Parse a line of user input into fragments.
///
/// Fragments are separated by whitespace or commas; empty pieces are dropped.
#[must_use]
pub fn parse_fragments(line: &str) -> Vec<String> {
    line.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}
