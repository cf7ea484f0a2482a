//! Trait definitions for ShelfSpin.
//!
//! These are the seams between the fetch/pick logic and whatever renders it.

use crate::models::FetchProgress;
use crate::picker::Pick;

/// Receives progress updates while a collection is being fetched.
///
/// Implemented for any `Fn(&FetchProgress)` closure, so callers can pass
/// `&|p| println!("{p}")` directly.
pub trait ProgressSink: Send + Sync {
    /// Called for each progress event.
    fn report(&self, progress: &FetchProgress);
}

impl<F> ProgressSink for F
where
    F: Fn(&FetchProgress) + Send + Sync,
{
    fn report(&self, progress: &FetchProgress) {
        self(progress);
    }
}

/// A sink that discards every update.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&self, _progress: &FetchProgress) {}
}

/// Presents a finished pick to the user.
///
/// The picker hands over the winner together with a reel that already
/// contains the winner's position; implementations only animate.
pub trait Announcer {
    /// Shows the reel and reveals the winner.
    ///
    /// # Errors
    ///
    /// Returns any I/O error raised while rendering.
    fn announce(&mut self, pick: &Pick) -> std::io::Result<()>;
}
