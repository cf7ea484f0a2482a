//! Player-count filtering and the random pick.
//!
//! Winner selection and the reel order are independent: the winner is drawn
//! uniformly from the candidates, the reel is a separate shuffle repeated
//! [`REEL_REPEATS`] times, and the reel only needs to know where the
//! winner's name sits inside its middle copy.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::CoreError;
use crate::models::{CollectionItem, FetchSession};

/// How many times the shuffled candidates are repeated on the reel.
pub const REEL_REPEATS: usize = 5;

// ============================================================================
// Outcome Types
// ============================================================================

/// The sequence of games scrolled past before landing on the winner.
#[derive(Debug, Clone)]
pub struct Reel {
    /// Shuffled candidates repeated [`REEL_REPEATS`] times.
    pub items: Vec<CollectionItem>,
    /// Position of the winner in the middle copy.
    pub winner_index: usize,
}

/// A successful pick.
#[derive(Debug, Clone)]
pub struct Pick {
    /// The chosen game.
    pub winner: CollectionItem,
    /// Requested player count.
    pub players: u32,
    /// How many games matched the player count.
    pub candidates: usize,
    /// Display reel ending on the winner.
    pub reel: Reel,
}

/// Result of asking the picker for a game.
#[derive(Debug, Clone)]
pub enum PickOutcome {
    /// The session has no unplayed base games at all.
    NoUnplayedGames,
    /// Unplayed games exist, but none fit the player count.
    NoMatchingGames {
        /// Requested player count.
        players: u32,
    },
    /// A winner was chosen.
    Picked(Pick),
}

// ============================================================================
// Filtering
// ============================================================================

/// Unplayed base games whose player range includes `players`.
///
/// Expansions are never candidates, and games without a detail entry are
/// skipped.
pub fn matching_games(session: &FetchSession, players: u32) -> Vec<&CollectionItem> {
    session
        .unplayed_games()
        .iter()
        .filter(|game| {
            session
                .detail(&game.id)
                .is_some_and(|detail| detail.supports(players))
        })
        .collect()
}

// ============================================================================
// Picking
// ============================================================================

/// Picks a random matching game using the thread-local RNG.
///
/// # Errors
///
/// Returns [`CoreError::InvalidPlayerCount`] if `players` is zero.
pub fn pick(session: &FetchSession, players: u32) -> Result<PickOutcome, CoreError> {
    pick_with_rng(session, players, &mut rand::thread_rng())
}

/// Picks a random matching game using the given RNG.
///
/// # Errors
///
/// Returns [`CoreError::InvalidPlayerCount`] if `players` is zero.
pub fn pick_with_rng<R: Rng + ?Sized>(
    session: &FetchSession,
    players: u32,
    rng: &mut R,
) -> Result<PickOutcome, CoreError> {
    if players == 0 {
        return Err(CoreError::InvalidPlayerCount(players));
    }

    if session.unplayed_games().is_empty() {
        return Ok(PickOutcome::NoUnplayedGames);
    }

    let candidates = matching_games(session, players);
    let Some(winner) = candidates.choose(rng).copied() else {
        return Ok(PickOutcome::NoMatchingGames { players });
    };

    let reel = build_reel(&candidates, winner, rng);

    Ok(PickOutcome::Picked(Pick {
        winner: winner.clone(),
        players,
        candidates: candidates.len(),
        reel,
    }))
}

/// Builds the display reel for an already chosen winner.
pub fn build_reel<R: Rng + ?Sized>(
    candidates: &[&CollectionItem],
    winner: &CollectionItem,
    rng: &mut R,
) -> Reel {
    let mut shuffled: Vec<CollectionItem> = candidates.iter().map(|&g| g.clone()).collect();
    shuffled.shuffle(rng);

    let offset = shuffled
        .iter()
        .position(|g| g.name == winner.name)
        .unwrap_or(0);
    let winner_index = offset + shuffled.len() * (REEL_REPEATS / 2);

    let items = std::iter::repeat_n(shuffled, REEL_REPEATS)
        .flatten()
        .collect();

    Reel {
        items,
        winner_index,
    }
}
