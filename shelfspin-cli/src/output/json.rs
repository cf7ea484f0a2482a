//! JSON output formatting.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use shelfspin_core::{CollectionItem, FetchSession, PickOutcome};

// ============================================================================
// Output Types
// ============================================================================

/// JSON output for a single game.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameOutput {
    pub id: String,
    pub name: String,
    pub thumbnail_url: String,
    pub bgg_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_players: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_players: Option<u32>,
}

/// JSON output for the list command.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOutput {
    pub username: String,
    pub fetched_at: DateTime<Utc>,
    pub games: Vec<GameOutput>,
    pub expansions: Vec<GameOutput>,
}

/// Kind of pick outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum OutcomeKind {
    Picked,
    NoUnplayedGames,
    NoMatchingGames,
}

/// JSON output for the pick command.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PickOutput {
    pub username: String,
    pub players: u32,
    pub outcome: OutcomeKind,
    pub candidates: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<GameOutput>,
}

// ============================================================================
// Formatter
// ============================================================================

/// JSON formatter.
#[derive(Debug, Clone, Copy)]
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize>(&self, data: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }

    /// Formats the unplayed games and expansions of a session.
    pub fn format_listing(&self, session: &FetchSession) -> Result<String> {
        let output = ListOutput {
            username: session.username().to_string(),
            fetched_at: session.fetched_at(),
            games: session
                .sorted_games()
                .into_iter()
                .map(|g| game_output(session, g))
                .collect(),
            expansions: session
                .sorted_expansions()
                .into_iter()
                .map(|g| game_output(session, g))
                .collect(),
        };
        self.format(&output)
    }

    /// Formats the outcome of a pick.
    pub fn format_pick(
        &self,
        session: &FetchSession,
        players: u32,
        outcome: &PickOutcome,
    ) -> Result<String> {
        let (kind, candidates, winner) = match outcome {
            PickOutcome::NoUnplayedGames => (OutcomeKind::NoUnplayedGames, 0, None),
            PickOutcome::NoMatchingGames { .. } => (OutcomeKind::NoMatchingGames, 0, None),
            PickOutcome::Picked(pick) => (
                OutcomeKind::Picked,
                pick.candidates,
                Some(game_output(session, &pick.winner)),
            ),
        };

        self.format(&PickOutput {
            username: session.username().to_string(),
            players,
            outcome: kind,
            candidates,
            winner,
        })
    }
}

fn game_output(session: &FetchSession, game: &CollectionItem) -> GameOutput {
    let detail = session.detail(&game.id);
    GameOutput {
        id: game.id.clone(),
        name: game.name.clone(),
        thumbnail_url: game.thumbnail_url.clone(),
        bgg_url: game.bgg_url(),
        min_players: detail.map(|d| d.min_players),
        max_players: detail.map(|d| d.max_players),
    }
}
