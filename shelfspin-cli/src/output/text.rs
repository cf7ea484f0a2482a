//! Text output formatting with colors.

use shelfspin_core::{CollectionItem, FetchProgress, FetchSession, PickOutcome};

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

/// Width of the name column in listings.
const NAME_WIDTH: usize = 40;

/// Text formatter with optional colors.
#[derive(Debug, Clone, Copy)]
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Formats a fetch progress update.
    pub fn format_progress(&self, progress: &FetchProgress) -> String {
        match progress {
            FetchProgress::Retrying { .. } => self.yellow(&progress.to_string()),
            _ => self.dim(&progress.to_string()),
        }
    }

    /// Formats the unplayed games and expansions of a session.
    pub fn format_listing(&self, session: &FetchSession) -> String {
        let mut lines = Vec::new();

        let games = session.sorted_games();
        if games.is_empty() {
            lines.push(self.bold("Unplayed Games"));
            lines.push("No unplayed base games found.".to_string());
        } else {
            lines.push(self.bold(&format!("Unplayed Games ({})", games.len())));
            lines.extend(games.iter().map(|g| self.format_game_line(session, g)));
        }

        lines.push(String::new());

        let expansions = session.sorted_expansions();
        if expansions.is_empty() {
            lines.push(self.bold("Unplayed Expansions"));
            lines.push("No expansions were filtered out.".to_string());
        } else {
            lines.push(self.bold(&format!("Unplayed Expansions ({})", expansions.len())));
            lines.extend(
                expansions
                    .iter()
                    .map(|g| self.dim(&self.format_game_line(session, g))),
            );
        }

        lines.join("\n")
    }

    /// One listing row: name, player range, BGG link.
    fn format_game_line(&self, session: &FetchSession, game: &CollectionItem) -> String {
        let range = session
            .detail(&game.id)
            .map_or_else(|| "?".to_string(), |d| d.player_range());
        let name = truncate(&game.name, NAME_WIDTH);
        format!("  {name:<NAME_WIDTH$} {range:>5}  {}", game.bgg_url())
    }

    /// Formats the outcome of a pick.
    ///
    /// For a successful pick this is the "spinning" line; the winner is
    /// revealed separately by the announcer.
    pub fn format_outcome(&self, outcome: &PickOutcome) -> String {
        match outcome {
            PickOutcome::NoUnplayedGames => {
                self.yellow("Found 0 unplayed base games in your collection!")
            }
            PickOutcome::NoMatchingGames { players } => self.yellow(&format!(
                "No unplayed games found for a max player count of {players}."
            )),
            PickOutcome::Picked(pick) => self.dim(&format!(
                "Found {} unplayed games for {} players. Spinning!",
                pick.candidates, pick.players
            )),
        }
    }

    /// Formats the winner reveal.
    pub fn format_winner(&self, winner: &CollectionItem) -> String {
        format!(
            "It's time for: {}\n{}",
            self.bold(&self.green(&format!("{}!", winner.name))),
            self.cyan(&winner.bgg_url())
        )
    }

    /// Formats one frame of the reel: the game under the pointer.
    pub fn format_reel_frame(&self, name: &str, settled: bool) -> String {
        if settled {
            self.bold(&format!("> {name} <"))
        } else {
            format!("  {name}  ")
        }
    }

    // ========================================================================
    // Color helpers
    // ========================================================================

    fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    fn green(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    fn yellow(&self, text: &str) -> String {
        self.paint(YELLOW, text)
    }

    fn cyan(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.use_colors {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

/// Shortens `text` to `width` characters, ending in an ellipsis.
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut short: String = text.chars().take(width.saturating_sub(1)).collect();
    short.push('…');
    short
}
