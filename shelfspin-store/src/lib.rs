// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # ShelfSpin Store
//!
//! State management for the ShelfSpin application.
//!
//! - **SessionStore**: the single-slot cache of the last fetched session
//!
//! ## Usage
//!
//! ```ignore
//! use shelfspin_store::SessionStore;
//!
//! let store = SessionStore::new();
//! if let Some(session) = store.get_for("alice").await {
//!     println!("{} unplayed games", session.unplayed_games().len());
//! }
//! ```

pub mod session_store;

pub use session_store::SessionStore;
