//! Shared pieces of the CLI commands: the command context, stdin prompts and
//! outcome printing.

use crate::catalog::{Catalog, RepoRef};
use crate::config::{Paths, Settings};
use crate::constants::SELF_BINARY_NAME;
use crate::core::{PuffError, user_friendly_error};
use crate::github::{ClientOptions, ReleaseClient};
use crate::orchestrator::{
    BatchReport, FragmentSource, InstallOutcome, Orchestrator, OrchestratorConfig,
    RemovalConfirmer, parse_fragments,
};
use anyhow::{Result, bail};
use colored::Colorize;
use std::io::{IsTerminal, Write};
use std::path::Path;

/// Everything a command needs after setup.
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Config directory layout
    pub paths: Paths,
    /// Settings from `config.toml`
    pub settings: Settings,
    /// GitHub token, possibly empty
    pub token: String,
    /// Print errors only
    pub quiet: bool,
    /// Hide progress bars
    pub no_progress: bool,
}

impl CommandContext {
    /// HTTP client configured from settings and token.
    ///
    /// # Errors
    ///
    /// Fails if the HTTP client cannot be built.
    pub fn client(&self) -> crate::core::Result<ReleaseClient> {
        ReleaseClient::new(ClientOptions {
            api_base_url: self.settings.api_base_url.clone(),
            token: self.token.clone(),
            timeout: self.settings.http_timeout(),
            show_progress: !self.quiet && !self.no_progress,
        })
    }

    /// Orchestrator configuration for this config directory.
    ///
    /// # Errors
    ///
    /// Fails if the built-in catalog does not compile.
    pub fn orchestrator_config(&self) -> crate::core::Result<OrchestratorConfig> {
        Ok(OrchestratorConfig {
            catalog: Catalog::featured()?,
            install_dir: self.paths.bin_dir(),
            metadata_dir: self.paths.metadata_dir().to_path_buf(),
            self_binary_name: SELF_BINARY_NAME.to_string(),
        })
    }

    /// Build an orchestrator with the given prompt collaborators.
    ///
    /// # Errors
    ///
    /// See [`Self::client`] and [`Self::orchestrator_config`].
    pub fn orchestrator<F, C>(&self, fragments: F, confirmer: C) -> crate::core::Result<Orchestrator<F, C>>
    where
        F: FragmentSource,
        C: RemovalConfirmer,
    {
        Ok(Orchestrator::new(self.orchestrator_config()?, self.client()?, fragments, confirmer))
    }

    /// Print a line unless `--quiet`.
    pub fn say(&self, line: impl std::fmt::Display) {
        if !self.quiet {
            println!("{line}");
        }
    }
}

/// Whether stdin is attached to a terminal.
#[must_use]
pub fn is_interactive() -> bool {
    std::io::stdin().is_terminal()
}

/// Print `message` and read one line from stdin.
///
/// Returns `None` at end of input. Reads go through the process-wide std
/// stdin buffer so consecutive prompts see consecutive lines of piped input.
///
/// # Errors
///
/// Fails if stdin cannot be read.
pub async fn prompt_line(message: &str) -> crate::core::Result<Option<String>> {
    print!("{message}");
    let _ = std::io::stdout().flush();

    let read = tokio::task::spawn_blocking(|| {
        let mut line = String::new();
        std::io::stdin().read_line(&mut line).map(|n| (n, line))
    })
    .await
    .map_err(|e| PuffError::Other {
        message: format!("prompt task failed: {e}"),
    })?;

    match read {
        Ok((0, _)) => Ok(None),
        Ok((_, line)) => Ok(Some(line.trim().to_string())),
        Err(e) => Err(PuffError::Other {
            message: format!("failed to read from stdin: {e}"),
        }),
    }
}

/// Ask a yes/no question; only `y` or `yes` (any case) counts as yes.
///
/// # Errors
///
/// Fails if stdin cannot be read.
pub async fn confirm(question: &str) -> crate::core::Result<bool> {
    let answer = prompt_line(&format!("{question} [y/N]: ")).await?;
    Ok(answer.is_some_and(|a| matches!(a.to_lowercase().as_str(), "y" | "yes")))
}

/// Asks for name fragments on stdin, after listing the release assets.
#[derive(Debug, Default)]
pub struct StdinFragments;

impl FragmentSource for StdinFragments {
    async fn fragments(&mut self, repo: &RepoRef, asset_names: &[&str]) -> crate::core::Result<Vec<String>> {
        println!("Assets of the latest release of {}:", repo.to_string().bold());
        for name in asset_names {
            println!("  {name}");
        }
        let line = prompt_line(
            "Enter parts of the asset name to install, separated by spaces (empty picks the first): ",
        )
        .await?;
        Ok(line.map(|l| parse_fragments(&l)).unwrap_or_default())
    }
}

/// Asks before deleting each file.
#[derive(Debug, Default)]
pub struct StdinConfirmer;

impl RemovalConfirmer for StdinConfirmer {
    async fn confirm(&mut self, _repo: &RepoRef, file: &Path) -> crate::core::Result<bool> {
        confirm(&format!("Delete {}?", file.display())).await
    }
}

/// One-line description of an install outcome.
#[must_use]
pub fn describe_outcome(path: &str, outcome: &InstallOutcome) -> String {
    match outcome {
        InstallOutcome::Installed { version } => {
            format!("{} {} {}", "Installed".green().bold(), path, version)
        }
        InstallOutcome::Updated { previous, version } => {
            format!("{} {} {} -> {}", "Updated".green().bold(), path, previous, version)
        }
        InstallOutcome::AlreadyCurrent { version } => {
            format!("{} {} is already at {}", "Up to date".cyan(), path, version)
        }
        InstallOutcome::NothingToInstall => {
            format!("{} {} has no release assets", "Skipped".yellow(), path)
        }
    }
}

/// Print a batch report and fail if any repository failed.
///
/// # Errors
///
/// Returns an error naming the failed count when at least one entry failed.
pub fn report_batch(ctx: &CommandContext, report: BatchReport) -> Result<()> {
    let total = report.len();
    let mut failed = 0;

    for (path, result) in report {
        match result {
            Ok(outcome) => ctx.say(describe_outcome(&path, &outcome)),
            Err(e) => {
                failed += 1;
                eprintln!("{} {}", "Failed".red().bold(), path);
                user_friendly_error(anyhow::Error::from(e)).display();
            }
        }
    }

    if failed > 0 {
        bail!("{failed} of {total} repositories failed");
    }
    Ok(())
}
