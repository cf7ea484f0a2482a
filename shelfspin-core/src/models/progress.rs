//! Progress events emitted while fetching a collection.
//!
//! These are advisory: callers render them however they like, and nothing
//! in the fetch logic depends on them being observed.

use std::fmt;

/// Why a fetch attempt is being retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryReason {
    /// BGG accepted the request but has not built the result yet.
    Queued,
    /// The proxy answered with an unexpected status code.
    ErrorStatus(u16),
    /// The request never produced a response.
    Network(String),
}

/// A progress update from the collection fetch client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchProgress {
    /// Both collection queries are in flight.
    FetchingCollection,
    /// A batch of game details is being fetched (1-based).
    FetchingDetails {
        /// Current batch number.
        batch: usize,
        /// Total number of batches.
        total: usize,
    },
    /// An attempt failed and the engine is about to wait and retry.
    Retrying {
        /// Attempts used so far.
        attempt: u32,
        /// Attempt cap.
        max_attempts: u32,
        /// Why the attempt did not succeed.
        reason: RetryReason,
    },
}

impl fmt::Display for FetchProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FetchingCollection => write!(f, "Fetching collection..."),
            Self::FetchingDetails { batch, total } => {
                write!(f, "Fetching game details (Batch {batch} of {total})...")
            }
            Self::Retrying {
                attempt,
                max_attempts,
                reason,
            } => match reason {
                RetryReason::Queued => write!(
                    f,
                    "BGG queued request. Retrying... ({attempt}/{max_attempts})"
                ),
                RetryReason::ErrorStatus(status) => write!(
                    f,
                    "API request failed with status {status}. Retrying... ({attempt}/{max_attempts})"
                ),
                RetryReason::Network(_) => {
                    write!(f, "Network error. Retrying... ({attempt}/{max_attempts})")
                }
            },
        }
    }
}
