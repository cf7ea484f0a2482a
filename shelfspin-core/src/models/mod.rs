//! Domain models for ShelfSpin.
//!
//! ## Submodules
//!
//! - [`collection`] - Collection entries and per-game details
//! - [`session`] - The per-username fetch session
//! - [`progress`] - Progress events emitted while fetching

mod collection;
mod progress;
mod session;

pub use collection::{CollectionItem, GameDetail, BGG_BOARDGAME_URL, PLACEHOLDER_THUMBNAIL};
pub use progress::{FetchProgress, RetryReason};
pub use session::FetchSession;
#[cfg(test)]
mod serde_tests;
