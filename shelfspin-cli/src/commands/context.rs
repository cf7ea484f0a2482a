//! Shared state for commands: the fetch client, the session store and the
//! output formatters.

use std::io::{self, IsTerminal, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use shelfspin_bgg::CollectionClient;
use shelfspin_core::{FetchProgress, FetchSession, NoProgress, Pick, PickOutcome, ProgressSink};
use shelfspin_fetch::{
    DirectTransport, Forwarder, HttpClient, HttpProxyTransport, Poller, ProxyTransport,
};
use shelfspin_store::SessionStore;
use tracing::{debug, info};

use crate::announce::{announce_in_background, PlainAnnouncer, ReelAnnouncer};
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Environment variable holding the BGG token for `--direct`.
const TOKEN_ENV: &str = "BGG_API_TOKEN";

/// Host that `--direct` is allowed to reach.
const BGG_HOST: &str = "boardgamegeek.com";

/// Everything a command needs to fetch and print.
pub struct CommandContext {
    client: CollectionClient<Arc<dyn ProxyTransport>>,
    store: SessionStore,
    format: OutputFormat,
    text: TextFormatter,
    json: JsonFormatter,
    quiet: bool,
}

impl CommandContext {
    /// Builds the transport selected by the global flags.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let transport: Arc<dyn ProxyTransport> = if cli.direct {
            let token = std::env::var(TOKEN_ENV).ok();
            info!(token = token.is_some(), "Forwarding to BGG in-process");
            let client = HttpClient::new()
                .context("Failed to build HTTP client")?
                .with_allowed_domains(vec![BGG_HOST.to_string()]);
            Arc::new(DirectTransport::new(Arc::new(Forwarder::new(client, token))))
        } else {
            debug!(proxy = %cli.proxy_url, "Using proxy");
            let client = HttpClient::new().context("Failed to build HTTP client")?;
            Arc::new(
                HttpProxyTransport::new(client, &cli.proxy_url)
                    .with_context(|| format!("Invalid proxy URL: {}", cli.proxy_url))?,
            )
        };

        Ok(Self {
            client: CollectionClient::new(Poller::new(transport)),
            store: SessionStore::new(),
            format: cli.format,
            text: TextFormatter::new(!cli.no_color && io::stdout().is_terminal()),
            json: JsonFormatter::new(cli.pretty),
            quiet: cli.quiet,
        })
    }

    /// Loads the session for `username`, reusing the stored one when the
    /// username matches. Progress goes to stderr in text mode.
    pub async fn load(&self, username: &str) -> Result<Arc<FetchSession>> {
        let session = if self.format == OutputFormat::Text && !self.quiet {
            let printer = ProgressPrinter::new(self.text);
            self.client.load_session(&self.store, username, &printer).await
        } else {
            self.client.load_session(&self.store, username, &NoProgress).await
        };
        Ok(session?)
    }

    /// Prints the unplayed listing of `session`.
    pub fn print_listing(&self, session: &FetchSession) -> Result<()> {
        match self.format {
            OutputFormat::Json => println!("{}", self.json.format_listing(session)?),
            OutputFormat::Text => println!("{}", self.text.format_listing(session)),
        }
        Ok(())
    }

    /// Prints a pick outcome, animating the reel when `spin` is set and
    /// stdout is a terminal.
    pub async fn print_outcome(
        &self,
        session: &FetchSession,
        players: u32,
        outcome: &PickOutcome,
        spin: bool,
    ) -> Result<()> {
        if self.format == OutputFormat::Json {
            println!("{}", self.json.format_pick(session, players, outcome)?);
            return Ok(());
        }

        println!("{}", self.text.format_outcome(outcome));
        if let PickOutcome::Picked(pick) = outcome {
            self.announce(pick.clone(), spin)
                .await
                .context("Failed to announce the winner")?;
        }
        Ok(())
    }

    async fn announce(&self, pick: Pick, spin: bool) -> io::Result<()> {
        let stdout = io::stdout();
        if spin && stdout.is_terminal() {
            announce_in_background(ReelAnnouncer::new(stdout, self.text), pick).await?;
        } else {
            announce_in_background(PlainAnnouncer::new(stdout, self.text), pick).await?;
        }
        Ok(())
    }
}

// ============================================================================
// Progress
// ============================================================================

/// Writes progress updates to stderr, one per line.
struct ProgressPrinter {
    formatter: TextFormatter,
}

impl ProgressPrinter {
    fn new(formatter: TextFormatter) -> Self {
        Self { formatter }
    }
}

impl ProgressSink for ProgressPrinter {
    fn report(&self, progress: &FetchProgress) {
        let mut stderr = io::stderr().lock();
        let _ = writeln!(stderr, "{}", self.formatter.format_progress(progress));
    }
}
