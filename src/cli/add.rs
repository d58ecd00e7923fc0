//! `puff add`: install repositories.

use super::common::{CommandContext, StdinConfirmer, StdinFragments, report_batch};
use anyhow::Result;
use clap::Args;

/// Install binaries from the latest release of one or more repositories.
///
/// Featured repositories pick their asset automatically. For any other
/// repository the release assets are listed and puff asks for parts of the
/// asset name to choose one; the answer is remembered for updates.
#[derive(Args)]
pub struct AddCommand {
    /// Repositories as owner/name (or a github.com URL)
    #[arg(required = true, value_name = "REPO")]
    repos: Vec<String>,
}

impl AddCommand {
    pub async fn execute(self, ctx: &CommandContext) -> Result<()> {
        let mut orchestrator = ctx.orchestrator(StdinFragments, StdinConfirmer)?;
        let report = orchestrator.install_all(&self.repos).await;
        report_batch(ctx, report)
    }
}
