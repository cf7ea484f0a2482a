//! BGG XML API v2 endpoint builders.

use url::form_urlencoded;

/// Public base URL of the BGG XML API v2.
pub const BGG_XMLAPI2_URL: &str = "https://boardgamegeek.com/xmlapi2";

/// Subtype that BGG uses for expansions.
const EXPANSION_SUBTYPE: &str = "boardgameexpansion";

/// Which half of a collection to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionKind {
    /// Owned items that are not expansions.
    BaseGames,
    /// Owned expansions.
    Expansions,
}

/// Builds collection and thing URLs against a base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BggEndpoints {
    base_url: String,
}

impl Default for BggEndpoints {
    fn default() -> Self {
        Self::new(BGG_XMLAPI2_URL)
    }
}

impl BggEndpoints {
    /// Creates endpoints rooted at `base_url` (no trailing slash needed).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    /// The base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Owned-collection query for `username`, with stats.
    pub fn collection_url(&self, username: &str, kind: CollectionKind) -> String {
        let username: String = form_urlencoded::byte_serialize(username.as_bytes()).collect();
        let subtype = match kind {
            CollectionKind::BaseGames => "excludesubtype",
            CollectionKind::Expansions => "subtype",
        };
        format!(
            "{}/collection?username={username}&stats=1&own=1&{subtype}={EXPANSION_SUBTYPE}",
            self.base_url
        )
    }

    /// Detail query for a batch of ids, comma-joined.
    pub fn thing_url<S: AsRef<str>>(&self, ids: &[S]) -> String {
        let ids: Vec<&str> = ids.iter().map(AsRef::as_ref).collect();
        format!("{}/thing?id={}&stats=1", self.base_url, ids.join(","))
    }
}
