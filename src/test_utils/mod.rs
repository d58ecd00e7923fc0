//! Test utilities for puff
//!
//! Fixtures shared by the unit tests and the integration suite:
//!
//! - [`tarball`] builds `.tar.gz` payloads in memory
//! - [`release_json`] renders a `releases/latest` response body
//! - [`ScriptedFragments`] and [`ScriptedConfirmer`] answer orchestrator
//!   prompts from a script and record what they were asked
//!
//! Compiled for `cfg(test)` and with the `test-utils` feature.

use crate::catalog::RepoRef;
use crate::core::Result;
use crate::orchestrator::{FragmentSource, RemovalConfirmer};
use flate2::Compression;
use flate2::write::GzEncoder;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Uses `level` if given, else `RUST_LOG`; with neither, logging stays off.
/// Safe to call from every test, only the first call has an effect.
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}

/// Build a gzip-compressed tar stream containing regular files.
///
/// # Panics
///
/// Panics if writing to the in-memory buffer fails.
#[must_use]
pub fn tarball(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = tar::Builder::new(encoder);
    for (path, content) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o755);
        header.set_cksum();
        builder.append_data(&mut header, path, *content).expect("append tar entry");
    }
    builder
        .into_inner()
        .expect("finish tar stream")
        .finish()
        .expect("finish gzip stream")
}

/// Render a `releases/latest` body with `(name, url)` assets.
#[must_use]
pub fn release_json(version: &str, assets: &[(&str, &str)]) -> String {
    let assets: Vec<serde_json::Value> = assets
        .iter()
        .map(|(name, url)| serde_json::json!({ "name": name, "browser_download_url": url }))
        .collect();
    serde_json::json!({ "tag_name": version, "assets": assets }).to_string()
}

/// Fragment source answering from a queue.
///
/// Once the queue is empty every further question gets no fragments.
#[derive(Debug, Default)]
pub struct ScriptedFragments {
    answers: VecDeque<Vec<String>>,
    /// Repository paths asked for, in order
    pub asked: Vec<String>,
}

impl ScriptedFragments {
    /// Queue one answer.
    #[must_use]
    pub fn answer(mut self, fragments: &[&str]) -> Self {
        self.answers.push_back(fragments.iter().map(|f| (*f).to_string()).collect());
        self
    }
}

impl FragmentSource for ScriptedFragments {
    async fn fragments(&mut self, repo: &RepoRef, _asset_names: &[&str]) -> Result<Vec<String>> {
        self.asked.push(repo.path().to_string());
        Ok(self.answers.pop_front().unwrap_or_default())
    }
}

/// Removal confirmer answering from a queue.
///
/// Once the queue is empty every further question is declined.
#[derive(Debug, Default)]
pub struct ScriptedConfirmer {
    answers: VecDeque<bool>,
    /// Files asked about, in order
    pub asked: Vec<PathBuf>,
}

impl ScriptedConfirmer {
    /// Queue answers in order.
    #[must_use]
    pub fn answers(answers: &[bool]) -> Self {
        Self {
            answers: answers.iter().copied().collect(),
            asked: Vec::new(),
        }
    }
}

impl RemovalConfirmer for ScriptedConfirmer {
    async fn confirm(&mut self, _repo: &RepoRef, file: &Path) -> Result<bool> {
        self.asked.push(file.to_path_buf());
        Ok(self.answers.pop_front().unwrap_or(false))
    }
}
