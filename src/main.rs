//! puff command-line entry point.
//!
//! Parses arguments, runs the command and prints failures with a suggestion
//! before exiting with status 1.

use anyhow::Result;
use clap::Parser;
use puff_cli::cli;
use puff_cli::core::user_friendly_error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::error!("{:#}", e);
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
