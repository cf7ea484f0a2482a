// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! ShelfSpin CLI - pick an unplayed board game from a BGG collection.
//!
//! # Examples
//!
//! ```bash
//! # Pick a game for four players (needs the proxy running)
//! shelfspin pick alice --players 4
//!
//! # Skip the proxy and call BGG directly with BGG_API_TOKEN
//! shelfspin --direct pick alice -n 2
//!
//! # Show the unplayed shelf as JSON
//! shelfspin list alice --format json --pretty
//!
//! # Interactive mode; the collection is fetched once per username
//! shelfspin shell
//! ```

mod announce;
mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{describe_error, list, pick, shell};

// ============================================================================
// CLI Definition
// ============================================================================

/// ShelfSpin CLI - spin for an unplayed game.
#[derive(Parser)]
#[command(name = "shelfspin")]
#[command(about = "Pick a random unplayed board game from a BoardGameGeek collection")]
#[command(long_about = r#"
ShelfSpin looks up a BoardGameGeek user's owned collection, keeps the games
with zero recorded plays, and picks one that fits the number of players.

Requests go through the ShelfSpin proxy, which adds the BGG API token.
Use --direct to call BGG from this process with BGG_API_TOKEN instead.

Examples:
  shelfspin pick alice --players 4   # Spin for a 4-player game
  shelfspin pick alice -n 2 --no-spin
  shelfspin list alice               # Unplayed games and expansions
  shelfspin shell                    # Interactive mode
"#)]
#[command(version)]
#[command(author = "ShelfSpin Contributors")]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Base URL of the ShelfSpin proxy.
    #[arg(
        long,
        env = "SHELFSPIN_PROXY_URL",
        default_value = "http://localhost:3000",
        global = true
    )]
    pub proxy_url: String,

    /// Call BGG directly using BGG_API_TOKEN instead of the proxy.
    #[arg(long, global = true)]
    pub direct: bool,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (no progress or logs).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Pick a random unplayed game for a player count.
    #[command(visible_alias = "p")]
    Pick(pick::PickArgs),

    /// List unplayed games and expansions.
    #[command(visible_alias = "l")]
    List(list::ListArgs),

    /// Interactive shell that keeps the fetched collection.
    #[command(visible_alias = "s")]
    Shell(shell::ShellArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return; // No logging in quiet mode
    }

    let filter = if verbose {
        EnvFilter::new("shelfspin=debug,info")
    } else {
        EnvFilter::new("shelfspin=warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Commands::Pick(args) => pick::run(args, &cli).await,
        Commands::List(args) => list::run(args, &cli).await,
        Commands::Shell(args) => shell::run(args, &cli).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", describe_error(&e));
        std::process::exit(ExitCode::Error as i32);
    }

    std::process::exit(ExitCode::Success as i32);
}
