//! Single-slot session store.
//!
//! Holds at most one [`FetchSession`]: the one for the last username that
//! was fetched successfully. A session is swapped in whole or the slot is
//! emptied; readers never observe a half-built session.

use shelfspin_core::FetchSession;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Owns the current fetch session, if any.
#[derive(Debug, Default)]
pub struct SessionStore {
    slot: RwLock<Option<Arc<FetchSession>>>,
}

impl SessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current session, whoever it belongs to.
    pub async fn current(&self) -> Option<Arc<FetchSession>> {
        self.slot.read().await.clone()
    }

    /// The current session if it was fetched for `username`.
    pub async fn get_for(&self, username: &str) -> Option<Arc<FetchSession>> {
        let session = self
            .slot
            .read()
            .await
            .as_ref()
            .filter(|s| s.is_for(username))
            .cloned();
        debug!(username, hit = session.is_some(), "Session lookup");
        session
    }

    /// Replaces whatever is stored with `session`.
    pub async fn commit(&self, session: FetchSession) -> Arc<FetchSession> {
        let session = Arc::new(session);
        *self.slot.write().await = Some(Arc::clone(&session));
        info!(
            username = session.username(),
            games = session.unplayed_games().len(),
            expansions = session.unplayed_expansions().len(),
            details = session.details().len(),
            "Session committed"
        );
        session
    }

    /// Empties the slot.
    pub async fn clear(&self) {
        if self.slot.write().await.take().is_some() {
            info!("Session cleared");
        }
    }

    /// Returns true if no session is stored.
    pub async fn is_empty(&self) -> bool {
        self.slot.read().await.is_none()
    }
}
