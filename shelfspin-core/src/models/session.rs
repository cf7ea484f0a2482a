//! The per-username fetch session.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

use super::collection::{CollectionItem, GameDetail};

/// Everything fetched for one username: unplayed games, unplayed
/// expansions, and player-count details for both.
///
/// `details_by_id` only ever holds ids that appear in one of the two item
/// lists; [`FetchSession::new`] drops any others.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchSession {
    username: String,
    unplayed_games: Vec<CollectionItem>,
    unplayed_expansions: Vec<CollectionItem>,
    details_by_id: HashMap<String, GameDetail>,
    fetched_at: DateTime<Utc>,
}

impl FetchSession {
    /// Builds a complete session.
    pub fn new(
        username: impl Into<String>,
        unplayed_games: Vec<CollectionItem>,
        unplayed_expansions: Vec<CollectionItem>,
        mut details_by_id: HashMap<String, GameDetail>,
    ) -> Self {
        let known: HashSet<&str> = unplayed_games
            .iter()
            .chain(&unplayed_expansions)
            .map(|item| item.id.as_str())
            .collect();
        details_by_id.retain(|id, _| known.contains(id.as_str()));

        Self {
            username: username.into(),
            unplayed_games,
            unplayed_expansions,
            details_by_id,
            fetched_at: Utc::now(),
        }
    }

    /// The username this session was fetched for.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns true if this session answers queries for `username`.
    pub fn is_for(&self, username: &str) -> bool {
        self.username == username
    }

    /// Unplayed base games, in collection order.
    pub fn unplayed_games(&self) -> &[CollectionItem] {
        &self.unplayed_games
    }

    /// Unplayed expansions, in collection order.
    pub fn unplayed_expansions(&self) -> &[CollectionItem] {
        &self.unplayed_expansions
    }

    /// All player-count details keyed by id.
    pub fn details(&self) -> &HashMap<String, GameDetail> {
        &self.details_by_id
    }

    /// Player-count detail for one id.
    pub fn detail(&self, id: &str) -> Option<&GameDetail> {
        self.details_by_id.get(id)
    }

    /// When the session was assembled.
    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    /// Unplayed base games sorted by name.
    pub fn sorted_games(&self) -> Vec<&CollectionItem> {
        sorted_by_name(&self.unplayed_games)
    }

    /// Unplayed expansions sorted by name.
    pub fn sorted_expansions(&self) -> Vec<&CollectionItem> {
        sorted_by_name(&self.unplayed_expansions)
    }
}

fn sorted_by_name(items: &[CollectionItem]) -> Vec<&CollectionItem> {
    let mut sorted: Vec<&CollectionItem> = items.iter().collect();
    sorted.sort_by_cached_key(|item| item.name.to_lowercase());
    sorted
}
