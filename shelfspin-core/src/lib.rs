// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `ShelfSpin` Core
//!
//! Core types, models, and picker logic for the `ShelfSpin` application.
//!
//! This crate has no network or rendering dependencies. It provides:
//!
//! - Domain models (collection items, game details, fetch sessions)
//! - Progress events emitted by the fetch client
//! - The player-count filter and random pick
//! - Trait seams for progress reporting and winner announcement
//!
//! ## Key Types
//!
//! - [`CollectionItem`] - An owned, unplayed game or expansion
//! - [`GameDetail`] - Min/max player counts for one game
//! - [`FetchSession`] - Everything fetched for one username
//! - [`PickOutcome`] - Result of a pick (winner, or why there is none)
//! - [`Announcer`] - Renders a pick

pub mod error;
pub mod models;
pub mod picker;
pub mod traits;

// Re-export error types
pub use error::CoreError;

// Re-export all model types
pub use models::{
    CollectionItem, FetchProgress, FetchSession, GameDetail, RetryReason, BGG_BOARDGAME_URL,
    PLACEHOLDER_THUMBNAIL,
};

// Re-export picker
pub use picker::{matching_games, pick, pick_with_rng, Pick, PickOutcome, Reel, REEL_REPEATS};

// Re-export traits
pub use traits::{Announcer, NoProgress, ProgressSink};
