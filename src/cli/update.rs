//! `puff update`: update everything installed.

use super::common::{CommandContext, report_batch};
use crate::orchestrator::{AssumeYes, NoFragments};
use anyhow::Result;
use clap::Args;

/// Update every installed binary to its latest release.
///
/// Free-form repositories reuse the name fragments given at install time,
/// so updating never asks questions.
#[derive(Args)]
pub struct UpdateCommand {}

impl UpdateCommand {
    pub async fn execute(self, ctx: &CommandContext) -> Result<()> {
        let mut orchestrator = ctx.orchestrator(NoFragments, AssumeYes)?;
        let report = orchestrator.update_all().await?;
        if report.is_empty() {
            ctx.say("Nothing installed, nothing to update.");
            return Ok(());
        }
        report_batch(ctx, report)
    }
}
