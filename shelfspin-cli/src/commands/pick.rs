//! Pick command - choose a random unplayed game for a player count.

use anyhow::Result;
use clap::Args;
use shelfspin_core::pick;
use tracing::info;

use super::context::CommandContext;
use crate::Cli;

/// Arguments for the pick command.
#[derive(Args)]
pub struct PickArgs {
    /// BGG username.
    pub username: String,

    /// Number of players at the table.
    #[arg(long, short = 'n', value_parser = clap::value_parser!(u32).range(1..))]
    pub players: u32,

    /// Reveal the winner without the reel animation.
    #[arg(long)]
    pub no_spin: bool,
}

/// Runs the pick command.
pub async fn run(args: &PickArgs, cli: &Cli) -> Result<()> {
    let ctx = CommandContext::from_cli(cli)?;
    pick_and_announce(&ctx, &args.username, args.players, !args.no_spin).await
}

/// Loads the session, picks, and prints the outcome.
pub async fn pick_and_announce(
    ctx: &CommandContext,
    username: &str,
    players: u32,
    spin: bool,
) -> Result<()> {
    let session = ctx.load(username).await?;
    let outcome = pick(&session, players)?;
    info!(username, players, "Pick complete");
    ctx.print_outcome(&session, players, &outcome, spin).await
}
