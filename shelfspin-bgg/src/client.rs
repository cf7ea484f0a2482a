//! Collection fetch client.
//!
//! Turns a username into a complete [`FetchSession`]:
//!
//! 1. Reuse the stored session if it belongs to the same username
//! 2. Query owned base games and owned expansions concurrently
//! 3. Fetch player counts for the union of ids in batches of 20, one batch
//!    at a time with a pause in between
//! 4. Commit the finished session, or clear the store on any failure

use shelfspin_core::{CollectionItem, CoreError, FetchProgress, FetchSession, GameDetail, ProgressSink};
use shelfspin_fetch::{FetchError, Poller, ProxyTransport};
use shelfspin_store::SessionStore;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::endpoints::{BggEndpoints, CollectionKind};
use crate::parser::{ensure_document, parse_collection, parse_details};

/// Ids per `thing` request.
pub const DETAIL_BATCH_SIZE: usize = 20;

/// Pause between consecutive `thing` requests.
pub const DETAIL_BATCH_DELAY: Duration = Duration::from_secs(5);

// ============================================================================
// Client
// ============================================================================

/// Fetches and assembles BGG collections through a [`Poller`].
#[derive(Debug, Clone)]
pub struct CollectionClient<T> {
    poller: Poller<T>,
    endpoints: BggEndpoints,
    batch_delay: Duration,
}

impl<T: ProxyTransport> CollectionClient<T> {
    /// Creates a client against the public BGG API.
    pub fn new(poller: Poller<T>) -> Self {
        Self {
            poller,
            endpoints: BggEndpoints::default(),
            batch_delay: DETAIL_BATCH_DELAY,
        }
    }

    /// Points the client at another API root.
    #[must_use]
    pub fn with_endpoints(mut self, endpoints: BggEndpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Changes the pause between detail batches.
    #[must_use]
    pub fn with_batch_delay(mut self, delay: Duration) -> Self {
        self.batch_delay = delay;
        self
    }

    /// Returns the session for `username`, fetching it if the store holds
    /// none for that user.
    ///
    /// # Errors
    ///
    /// [`CoreError::MissingUsername`] for a blank username, otherwise any
    /// error from polling or parsing. The store is emptied before the
    /// error is returned.
    #[instrument(skip(self, store, progress))]
    pub async fn load_session(
        &self,
        store: &SessionStore,
        username: &str,
        progress: &dyn ProgressSink,
    ) -> Result<Arc<FetchSession>, FetchError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(CoreError::MissingUsername.into());
        }

        if let Some(session) = store.get_for(username).await {
            info!(username, "Using cached session");
            return Ok(session);
        }

        match self.fetch_session(username, progress).await {
            Ok(session) => Ok(store.commit(session).await),
            Err(e) => {
                warn!(username, error = %e, "Fetch failed, clearing session");
                store.clear().await;
                Err(e)
            }
        }
    }

    /// Fetches a fresh session for `username` without touching any store.
    ///
    /// # Errors
    ///
    /// Any polling or parsing failure.
    pub async fn fetch_session(
        &self,
        username: &str,
        progress: &dyn ProgressSink,
    ) -> Result<FetchSession, FetchError> {
        progress.report(&FetchProgress::FetchingCollection);

        let base_url = self.endpoints.collection_url(username, CollectionKind::BaseGames);
        let expansion_url = self.endpoints.collection_url(username, CollectionKind::Expansions);
        let (base_xml, expansion_xml) = tokio::try_join!(
            self.poller.fetch(&base_url, progress),
            self.poller.fetch(&expansion_url, progress),
        )?;

        let games = parse_collection(&ensure_document(&base_xml)?);
        let expansions = parse_collection(&ensure_document(&expansion_xml)?);
        info!(
            username,
            games = games.len(),
            expansions = expansions.len(),
            "Fetched unplayed collection"
        );

        let ids = union_ids(&games, &expansions);
        let details = self.fetch_details(&ids, progress).await?;

        Ok(FetchSession::new(username, games, expansions, details))
    }

    async fn fetch_details(
        &self,
        ids: &[&str],
        progress: &dyn ProgressSink,
    ) -> Result<HashMap<String, GameDetail>, FetchError> {
        let mut details = HashMap::new();
        let total = ids.len().div_ceil(DETAIL_BATCH_SIZE);

        for (index, batch) in ids.chunks(DETAIL_BATCH_SIZE).enumerate() {
            let number = index + 1;
            progress.report(&FetchProgress::FetchingDetails { batch: number, total });
            debug!(batch = number, total, size = batch.len(), "Fetching detail batch");

            let xml = self.poller.fetch(&self.endpoints.thing_url(batch), progress).await?;
            details.extend(parse_details(&ensure_document(&xml)?));

            if number < total {
                tokio::time::sleep(self.batch_delay).await;
            }
        }

        Ok(details)
    }
}

/// Ids of both lists, first occurrence wins.
fn union_ids<'a>(games: &'a [CollectionItem], expansions: &'a [CollectionItem]) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    games
        .iter()
        .chain(expansions)
        .map(|item| item.id.as_str())
        .filter(|id| seen.insert(*id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use shelfspin_core::{NoProgress, RetryReason};
    use shelfspin_fetch::{HttpError, ProxyResponse, RetryPolicy};
    use std::sync::Mutex;
    use tokio::time::Instant;
    use url::Url;

    // ========================================================================
    // Fake BGG
    // ========================================================================

    /// (id, name, plays, min players, max players)
    type Game = (&'static str, &'static str, u32, u32, u32);

    #[derive(Default)]
    struct FakeBgg {
        base_games: HashMap<&'static str, Vec<Game>>,
        expansions: HashMap<&'static str, Vec<Game>>,
        error_for: Option<&'static str>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeBgg {
        fn with_user(mut self, user: &'static str, games: Vec<Game>, expansions: Vec<Game>) -> Self {
            self.base_games.insert(user, games);
            self.expansions.insert(user, expansions);
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn thing_calls(&self) -> Vec<Vec<String>> {
            self.calls()
                .iter()
                .filter_map(|url| {
                    let url = Url::parse(url).unwrap();
                    if !url.path().ends_with("/thing") {
                        return None;
                    }
                    let ids = query(&url, "id").unwrap();
                    Some(ids.split(',').map(str::to_string).collect())
                })
                .collect()
        }

        fn all_games(&self) -> impl Iterator<Item = &Game> {
            self.base_games.values().chain(self.expansions.values()).flatten()
        }

        fn collection_xml(games: &[Game]) -> String {
            let items: String = games
                .iter()
                .map(|(id, name, plays, _, _)| {
                    format!(
                        r#"<item objecttype="thing" objectid="{id}"><name sortindex="1">{name}</name><numplays>{plays}</numplays></item>"#
                    )
                })
                .collect();
            format!(r#"<?xml version="1.0" encoding="utf-8"?><items totalitems="{}">{items}</items>"#, games.len())
        }

        fn thing_xml(&self, ids: &str) -> String {
            let items: String = ids
                .split(',')
                .filter_map(|id| self.all_games().find(|g| g.0 == id))
                .map(|(id, _, _, min, max)| {
                    format!(r#"<item type="boardgame" id="{id}"><minplayers value="{min}"/><maxplayers value="{max}"/></item>"#)
                })
                .collect();
            format!(r#"<?xml version="1.0" encoding="utf-8"?><items>{items}</items>"#)
        }
    }

    fn query(url: &Url, key: &str) -> Option<String> {
        url.query_pairs().find(|(k, _)| k == key).map(|(_, v)| v.into_owned())
    }

    #[async_trait]
    impl ProxyTransport for FakeBgg {
        async fn get(&self, target_url: &str) -> Result<ProxyResponse, HttpError> {
            self.calls.lock().unwrap().push(target_url.to_string());
            let url = Url::parse(target_url).map_err(|e| HttpError::InvalidUrl(e.to_string()))?;

            if url.path().ends_with("/thing") {
                let ids = query(&url, "id").unwrap_or_default();
                return Ok(ProxyResponse::new(200, self.thing_xml(&ids)));
            }

            let user = query(&url, "username").unwrap_or_default();
            if self.error_for == Some(user.as_str()) {
                return Ok(ProxyResponse::new(
                    200,
                    "<errors><error><message>Invalid username specified</message></error></errors>",
                ));
            }
            let source = if query(&url, "subtype").is_some() {
                &self.expansions
            } else {
                &self.base_games
            };
            let games = source.get(user.as_str()).cloned().unwrap_or_default();
            Ok(ProxyResponse::new(200, Self::collection_xml(&games)))
        }
    }

    fn client(fake: &Arc<FakeBgg>) -> CollectionClient<Arc<FakeBgg>> {
        CollectionClient::new(Poller::new(Arc::clone(fake)))
    }

    fn numbered_games(count: usize) -> Vec<Game> {
        (1..=count)
            .map(|i| {
                let id: &'static str = Box::leak(i.to_string().into_boxed_str());
                let name: &'static str = Box::leak(format!("Game {i}").into_boxed_str());
                (id, name, 0, 2, 4)
            })
            .collect()
    }

    // ========================================================================
    // Tests
    // ========================================================================

    #[tokio::test(start_paused = true)]
    async fn test_load_session_builds_complete_session() {
        let fake = Arc::new(FakeBgg::default().with_user(
            "alice",
            vec![
                ("13", "Catan", 0, 3, 4),
                ("822", "Carcassonne", 5, 2, 5),
                ("30549", "Pandemic", 0, 2, 4),
            ],
            vec![("926", "Catan: Seafarers", 0, 3, 4)],
        ));
        let store = SessionStore::new();

        let session = client(&fake).load_session(&store, "alice", &NoProgress).await.unwrap();

        let games: Vec<&str> = session.unplayed_games().iter().map(|g| g.name.as_str()).collect();
        assert_eq!(games, vec!["Catan", "Pandemic"]);
        assert_eq!(session.unplayed_expansions().len(), 1);
        assert_eq!(session.details().len(), 3);
        assert_eq!(session.detail("13"), Some(&GameDetail::new(3, 4)));
        assert!(store.get_for("alice").await.is_some());

        assert_eq!(fake.thing_calls(), vec![vec!["13", "30549", "926"]]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_username_reuses_session() {
        let fake = Arc::new(FakeBgg::default().with_user("alice", vec![("13", "Catan", 0, 3, 4)], vec![]));
        let store = SessionStore::new();
        let client = client(&fake);

        let first = client.load_session(&store, "alice", &NoProgress).await.unwrap();
        let calls = fake.calls().len();
        let second = client.load_session(&store, " alice ", &NoProgress).await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(fake.calls().len(), calls);
    }

    #[tokio::test(start_paused = true)]
    async fn test_different_username_replaces_session() {
        let fake = Arc::new(
            FakeBgg::default()
                .with_user("alice", vec![("13", "Catan", 0, 3, 4)], vec![])
                .with_user("bob", vec![("30549", "Pandemic", 0, 2, 4)], vec![]),
        );
        let store = SessionStore::new();
        let client = client(&fake);

        client.load_session(&store, "alice", &NoProgress).await.unwrap();
        let bob = client.load_session(&store, "bob", &NoProgress).await.unwrap();

        assert_eq!(bob.username(), "bob");
        assert!(bob.detail("13").is_none());
        assert!(bob.detail("30549").is_some());
        assert!(store.get_for("alice").await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_details_fetched_in_batches_of_twenty() {
        let fake = Arc::new(FakeBgg::default().with_user("alice", numbered_games(45), vec![]));
        let store = SessionStore::new();
        let batches = Mutex::new(Vec::new());
        let progress = |event: &FetchProgress| {
            if let FetchProgress::FetchingDetails { batch, total } = event {
                batches.lock().unwrap().push((*batch, *total));
            }
        };

        let start = Instant::now();
        let session = client(&fake).load_session(&store, "alice", &progress).await.unwrap();

        let sizes: Vec<usize> = fake.thing_calls().iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![20, 20, 5]);
        assert_eq!(start.elapsed(), DETAIL_BATCH_DELAY * 2);
        assert_eq!(session.details().len(), 45);
        assert_eq!(*batches.lock().unwrap(), vec![(1, 3), (2, 3), (3, 3)]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_batch_has_no_delay() {
        let fake = Arc::new(FakeBgg::default().with_user("alice", numbered_games(20), vec![]));
        let store = SessionStore::new();

        let start = Instant::now();
        client(&fake).load_session(&store, "alice", &NoProgress).await.unwrap();

        assert_eq!(fake.thing_calls().len(), 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_collection_skips_detail_fetch() {
        let fake = Arc::new(FakeBgg::default().with_user("alice", vec![("822", "Carcassonne", 3, 2, 5)], vec![]));
        let store = SessionStore::new();

        let session = client(&fake).load_session(&store, "alice", &NoProgress).await.unwrap();

        assert!(session.unplayed_games().is_empty());
        assert!(fake.thing_calls().is_empty());
        assert_eq!(fake.calls().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shared_ids_are_fetched_once() {
        let fake = Arc::new(FakeBgg::default().with_user(
            "alice",
            vec![("13", "Catan", 0, 3, 4)],
            vec![("13", "Catan", 0, 3, 4), ("926", "Seafarers", 0, 3, 4)],
        ));
        let store = SessionStore::new();

        client(&fake).load_session(&store, "alice", &NoProgress).await.unwrap();

        assert_eq!(fake.thing_calls(), vec![vec!["13", "926"]]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_error_document_clears_store() {
        let fake = Arc::new(FakeBgg {
            error_for: Some("nobody"),
            ..FakeBgg::default()
        }
        .with_user("alice", vec![("13", "Catan", 0, 3, 4)], vec![]));
        let store = SessionStore::new();
        let client = client(&fake);
        client.load_session(&store, "alice", &NoProgress).await.unwrap();

        let err = client.load_session(&store, "nobody", &NoProgress).await.unwrap_err();

        assert!(matches!(err, FetchError::MalformedResponse(ref m) if m == "Invalid username specified"));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_blank_username_is_rejected() {
        let fake = Arc::new(FakeBgg::default());
        let store = SessionStore::new();

        let err = client(&fake).load_session(&store, "   ", &NoProgress).await.unwrap_err();

        assert!(matches!(err, FetchError::Core(CoreError::MissingUsername)));
        assert!(fake.calls().is_empty());
    }

    /// Always answers 202.
    struct AlwaysQueued;

    #[async_trait]
    impl ProxyTransport for AlwaysQueued {
        async fn get(&self, _target_url: &str) -> Result<ProxyResponse, HttpError> {
            Ok(ProxyResponse::new(202, ""))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_exhaustion_clears_store_and_reports_progress() {
        let store = SessionStore::new();
        let events = Mutex::new(Vec::new());
        let progress = |event: &FetchProgress| events.lock().unwrap().push(event.clone());
        let client = CollectionClient::new(Poller::new(AlwaysQueued).with_policy(RetryPolicy::new(2)));

        let err = client.load_session(&store, "alice", &progress).await.unwrap_err();

        assert!(matches!(err, FetchError::RetryExhausted { attempts: 2 }));
        assert!(store.is_empty().await);
        let events = events.lock().unwrap();
        assert_eq!(events[0], FetchProgress::FetchingCollection);
        assert!(events[1..].iter().all(|e| matches!(
            e,
            FetchProgress::Retrying { reason: RetryReason::Queued, max_attempts: 2, .. }
        )));
    }
}
