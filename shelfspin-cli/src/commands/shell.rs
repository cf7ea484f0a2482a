//! Shell command - interactive picking that keeps the fetched session.
//!
//! Each line is `<username> <players>` or `list <username>`. Repeated
//! queries for the same username reuse the session fetched the first time.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use super::context::CommandContext;
use super::{describe_error, pick::pick_and_announce};
use crate::Cli;

const PROMPT: &str = "shelfspin> ";

const HELP: &str = "\
Commands:
  <username> <players>   pick an unplayed game
  list <username>        show unplayed games and expansions
  help                   show this message
  quit                   leave the shell";

/// Arguments for the shell command.
#[derive(Args)]
pub struct ShellArgs {
    /// Reveal winners without the reel animation.
    #[arg(long)]
    pub no_spin: bool,
}

/// A parsed shell line.
#[derive(Debug, PartialEq, Eq)]
enum ShellCommand {
    Pick { username: String, players: u32 },
    List { username: String },
    Help,
    Quit,
    Empty,
}

fn parse_line(line: &str) -> Result<ShellCommand, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    match words.as_slice() {
        [] => Ok(ShellCommand::Empty),
        ["quit" | "exit"] => Ok(ShellCommand::Quit),
        ["help" | "?"] => Ok(ShellCommand::Help),
        ["list", username] => Ok(ShellCommand::List {
            username: (*username).to_string(),
        }),
        [username, players] => match players.parse::<u32>() {
            Ok(players) if players >= 1 => Ok(ShellCommand::Pick {
                username: (*username).to_string(),
                players,
            }),
            _ => Err(format!("Invalid player count: {players}")),
        },
        _ => Err("Expected `<username> <players>`; type `help` for commands".to_string()),
    }
}

/// Runs the shell command.
pub async fn run(args: &ShellArgs, cli: &Cli) -> Result<()> {
    let ctx = CommandContext::from_cli(cli)?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    info!("Starting shell");
    if !cli.quiet {
        println!("{HELP}");
    }

    loop {
        print!("{PROMPT}");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };

        let command = match parse_line(&line) {
            Ok(command) => command,
            Err(message) => {
                eprintln!("Error: {message}");
                continue;
            }
        };

        let result = match command {
            ShellCommand::Empty => Ok(()),
            ShellCommand::Help => {
                println!("{HELP}");
                Ok(())
            }
            ShellCommand::Quit => break,
            ShellCommand::List { username } => match ctx.load(&username).await {
                Ok(session) => ctx.print_listing(&session),
                Err(e) => Err(e),
            },
            ShellCommand::Pick { username, players } => {
                pick_and_announce(&ctx, &username, players, !args.no_spin).await
            }
        };

        if let Err(e) = result {
            eprintln!("Error: {}", describe_error(&e));
        }
    }

    Ok(())
}
