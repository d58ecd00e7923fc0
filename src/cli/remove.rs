//! `puff remove`: delete an installed binary.

use super::common::{CommandContext, StdinConfirmer};
use crate::orchestrator::{AssumeYes, NoFragments, RemovalConfirmer, RemoveOutcome};
use anyhow::Result;
use clap::Args;
use colored::Colorize;

/// Remove an installed binary.
///
/// Every file in the bin directory whose name contains the repository name is
/// offered for deletion. Declining any of them keeps the repository recorded
/// as installed.
#[derive(Args)]
pub struct RemoveCommand {
    /// Repository as owner/name
    #[arg(value_name = "REPO")]
    repo: String,

    /// Delete without asking
    #[arg(short, long)]
    yes: bool,
}

impl RemoveCommand {
    pub async fn execute(self, ctx: &CommandContext) -> Result<()> {
        if self.yes {
            remove_with(ctx, &self.repo, AssumeYes).await
        } else {
            remove_with(ctx, &self.repo, StdinConfirmer).await
        }
    }
}

async fn remove_with<C: RemovalConfirmer>(ctx: &CommandContext, repo: &str, confirmer: C) -> Result<()> {
    let mut orchestrator = ctx.orchestrator(NoFragments, confirmer)?;

    match orchestrator.remove(repo).await? {
        RemoveOutcome::Removed { files } => {
            for file in &files {
                ctx.say(format!("Deleted {}", file.display()));
            }
            ctx.say(format!("{} {}", "Removed".green().bold(), repo));
        }
        RemoveOutcome::Skipped { declined, .. } => {
            ctx.say(format!(
                "{} {}: kept {}, it stays recorded as installed",
                "Skipped".yellow(),
                repo,
                declined.display()
            ));
        }
        RemoveOutcome::NotInstalled => {
            ctx.say(format!("{repo} is not installed"));
        }
    }
    Ok(())
}
