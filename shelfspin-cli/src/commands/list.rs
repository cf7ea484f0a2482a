//! List command - show a user's unplayed games and expansions.

use anyhow::Result;
use clap::Args;

use super::context::CommandContext;
use crate::Cli;

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {
    /// BGG username.
    pub username: String,
}

/// Runs the list command.
pub async fn run(args: &ListArgs, cli: &Cli) -> Result<()> {
    let ctx = CommandContext::from_cli(cli)?;
    let session = ctx.load(&args.username).await?;
    ctx.print_listing(&session)
}
