//! Collection entries and per-game details.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Thumbnail used when a collection entry has none.
pub const PLACEHOLDER_THUMBNAIL: &str = "https://placehold.co/140x140/eeeeee/cccccc?text=No+Image";

/// Public page for a board game, suffixed with its id.
pub const BGG_BOARDGAME_URL: &str = "https://boardgamegeek.com/boardgame";

// ============================================================================
// Collection Item
// ============================================================================

/// One owned game or expansion with zero recorded plays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionItem {
    /// BGG object id.
    pub id: String,
    /// Primary name.
    pub name: String,
    /// Thumbnail URL (placeholder when BGG has none).
    pub thumbnail_url: String,
}

impl CollectionItem {
    /// Creates a new collection item.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        thumbnail_url: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            thumbnail_url: thumbnail_url
                .filter(|url| !url.is_empty())
                .unwrap_or_else(|| PLACEHOLDER_THUMBNAIL.to_string()),
        }
    }

    /// Link to this game's page on BoardGameGeek.
    pub fn bgg_url(&self) -> String {
        format!("{BGG_BOARDGAME_URL}/{}", self.id)
    }

    /// Returns true if the thumbnail is the placeholder image.
    pub fn has_placeholder_thumbnail(&self) -> bool {
        self.thumbnail_url == PLACEHOLDER_THUMBNAIL
    }
}

impl fmt::Display for CollectionItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

// ============================================================================
// Game Detail
// ============================================================================

/// Player-count detail for a single game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDetail {
    /// Minimum supported players.
    pub min_players: u32,
    /// Maximum supported players.
    pub max_players: u32,
}

impl GameDetail {
    /// Creates a new detail record.
    pub fn new(min_players: u32, max_players: u32) -> Self {
        Self {
            min_players,
            max_players,
        }
    }

    /// Returns true if a table of `players` fits this game.
    pub fn supports(&self, players: u32) -> bool {
        self.min_players <= players && players <= self.max_players
    }

    /// Player range as `"min-max"`.
    pub fn player_range(&self) -> String {
        format!("{}-{}", self.min_players, self.max_players)
    }
}
