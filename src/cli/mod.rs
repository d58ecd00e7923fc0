//! Command-line interface for puff.
//!
//! # Commands
//!
//! - `list` - Show featured repositories, or installed ones with `--installed`
//! - `add` - Install one or more repositories from their latest release
//! - `update` - Update every installed repository
//! - `remove` - Delete an installed binary and forget it
//!
//! # Global Options
//!
//! - `--verbose` / `-v` - Debug-level entries in the log file
//! - `--quiet` / `-q` - Only print errors
//! - `--no-progress` - Hide download progress bars
//! - `--config-dir` - Use another config directory (`PUFF_CONFIG_DIR`)
//!
//! Every command first runs the setup in [`setup`]: it creates the config
//! directory layout and, in an interactive terminal, asks for a GitHub token
//! and offers to put the bin directory on `PATH`.
//!
//! # Examples
//!
//! ```bash
//! puff list
//! puff add pgulb/plasma
//! puff add cli/cli junegunn/fzf
//! puff update
//! puff remove junegunn/fzf --yes
//! ```

mod add;
pub mod common;
mod list;
mod logging;
mod remove;
pub mod setup;
mod update;


use crate::config::{Paths, Settings, token};
use anyhow::Result;
use clap::{Parser, Subcommand};
use common::CommandContext;
use std::path::PathBuf;
use tracing::{debug, info};

/// Settings derived from the global flags.
///
/// Kept separate from [`Cli`] so tests can run commands with an explicit
/// configuration instead of parsing arguments.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log level for the log file; `RUST_LOG` overrides it
    pub log_level: Option<String>,
    /// Hide progress bars
    pub no_progress: bool,
    /// Print errors only
    pub quiet: bool,
    /// Config directory override
    pub config_dir: Option<PathBuf>,
    /// Whether setup may ask questions on stdin
    pub interactive: bool,
}

impl CliConfig {
    /// Empty configuration: default directory, info logging, progress shown,
    /// no setup questions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the config directory layout.
    ///
    /// # Errors
    ///
    /// Fails if no override is given and the user config directory is unknown.
    pub fn paths(&self) -> Result<Paths> {
        Ok(match &self.config_dir {
            Some(dir) => Paths::new(dir),
            None => Paths::resolve()?,
        })
    }
}

/// Install prebuilt binaries from GitHub Releases.
#[derive(Parser)]
#[command(
    name = "puff",
    about = "Install, update and remove prebuilt binaries from GitHub Releases",
    version,
    long_about = "puff downloads release assets from GitHub, unpacks the binary into its own bin directory and remembers which version is installed so that `puff update` can upgrade everything at once."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Write debug-level entries to the log file
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Hide download progress bars (also PUFF_NO_PROGRESS)
    #[arg(long, global = true)]
    no_progress: bool,

    /// Config directory holding bin/, metadata.json and gh_pat
    #[arg(long, global = true, env = "PUFF_CONFIG_DIR", value_name = "DIR")]
    config_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List featured repositories or installed binaries
    List(list::ListCommand),

    /// Install binaries from the latest release of repositories
    Add(add::AddCommand),

    /// Update every installed binary to its latest release
    Update(update::UpdateCommand),

    /// Remove an installed binary
    Remove(remove::RemoveCommand),
}

impl Cli {
    /// Run the parsed command.
    ///
    /// # Errors
    ///
    /// Setup failures, or the command's own failure.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Translate the global flags into a [`CliConfig`].
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug"
        } else {
            "info"
        };

        CliConfig {
            log_level: Some(log_level.to_string()),
            no_progress: self.no_progress,
            quiet: self.quiet,
            config_dir: self.config_dir.clone(),
            interactive: common::is_interactive(),
        }
    }

    /// Run the command with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Setup failures, or the command's own failure.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        let paths = config.paths()?;
        let created = setup::prepare_config_dir(&paths)?;
        if created && !config.quiet {
            println!("Created config directory {}", paths.root().display());
        }
        logging::init(&paths.log_file(), config.log_level.as_deref())?;
        if created {
            info!("Created config directory {}", paths.root().display());
        }
        debug!("Running with config dir {}", paths.root().display());

        setup::bootstrap(&paths, config.interactive).await?;

        let settings = Settings::load(&paths.settings_file()).await?;
        let token = token::resolve_token(&paths.token_file()).await?;
        let ctx = CommandContext {
            paths,
            settings,
            token,
            quiet: config.quiet,
            no_progress: config.no_progress,
        };

        match self.command {
            Commands::List(cmd) => cmd.execute(&ctx).await,
            Commands::Add(cmd) => cmd.execute(&ctx).await,
            Commands::Update(cmd) => cmd.execute(&ctx).await,
            Commands::Remove(cmd) => cmd.execute(&ctx).await,
        }
    }
}
