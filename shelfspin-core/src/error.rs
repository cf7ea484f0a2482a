//! Core error types for `ShelfSpin`.

use thiserror::Error;

/// Core error type for `ShelfSpin` operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The requested player count cannot match any game.
    #[error("Invalid player count: {0} (must be at least 1)")]
    InvalidPlayerCount(u32),

    /// A username was empty after trimming.
    #[error("A BGG username is required")]
    MissingUsername,

    /// Invalid data from an upstream document.
    #[error("Invalid data: {0}")]
    InvalidData(String),
}
