//! `puff list`: featured repositories, or what is installed.

use super::common::CommandContext;
use crate::catalog::Catalog;
use crate::metadata::InstallState;
use anyhow::Result;
use clap::Args;
use colored::Colorize;

/// List featured repositories or installed binaries.
#[derive(Args)]
pub struct ListCommand {
    /// Show installed repositories with their versions instead
    #[arg(short, long)]
    installed: bool,
}

impl ListCommand {
    pub async fn execute(self, ctx: &CommandContext) -> Result<()> {
        let state = InstallState::load(ctx.paths.metadata_dir())?;
        let lines = if self.installed {
            installed_lines(&state)
        } else {
            featured_lines(&Catalog::featured()?, &state)
        };

        for line in lines {
            println!("{line}");
        }
        Ok(())
    }
}

fn featured_lines(catalog: &Catalog, state: &InstallState) -> Vec<String> {
    catalog
        .iter()
        .map(|entry| {
            let repo = entry.repo();
            let mut line =
                format!("{} - {}", repo.path().bold(), repo.description().unwrap_or_default());
            if let Some(installed) = state.find(repo.path()) {
                line.push_str(&format!(" {}", format!("(installed {})", installed.version).green()));
            }
            line
        })
        .collect()
}

fn installed_lines(state: &InstallState) -> Vec<String> {
    if state.is_empty() {
        return vec!["Nothing installed yet. Try 'puff add <owner/name>'.".to_string()];
    }

    state
        .entries()
        .iter()
        .map(|entry| {
            let mut line = format!("{} {}", entry.path.bold(), entry.version);
            if !entry.name_fragments.is_empty() {
                line.push_str(&format!(" [{}]", entry.name_fragments.join(" ")));
            }
            line
        })
        .collect()
}
