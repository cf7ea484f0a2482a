//! Fetch error types.

use shelfspin_core::CoreError;
use thiserror::Error;

// ============================================================================
// Main Fetch Error
// ============================================================================

/// Error type for client-side fetch operations.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The proxy rejected the request as malformed. Never retried.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Every polling attempt came back queued, failed, or unreachable.
    #[error("No usable response after {attempts} attempts")]
    RetryExhausted {
        /// Attempts made before giving up.
        attempts: u32,
    },

    /// The upstream document did not parse or carried an `<error>` element.
    #[error("{0}")]
    MalformedResponse(String),

    /// Transport-level failure outside the polling loop.
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    /// Core error.
    #[error("Core error: {0}")]
    Core(#[from] CoreError),
}

impl FetchError {
    /// A single human-readable line suitable for showing to the user.
    pub fn user_message(&self) -> String {
        match self {
            Self::RetryExhausted { .. } => {
                "Could not retrieve collection from BGG. Please check the username and try again later."
                    .to_string()
            }
            other => format!("{other}. Check the username and try again."),
        }
    }
}

// ============================================================================
// HTTP Error
// ============================================================================

/// HTTP-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Request error.
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// Domain not allowed.
    #[error("Domain not allowed: {0}")]
    DomainNotAllowed(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

// ============================================================================
// Forward Error
// ============================================================================

/// Error type for the server-side forwarder.
#[derive(Debug, Error)]
pub enum ForwardError {
    /// The target URL was missing, unparseable, or not allowed.
    #[error("{0}")]
    BadRequest(String),

    /// BGG answered with a non-2xx status.
    #[error("BGG API responded with status {0}")]
    UpstreamStatus(u16),

    /// BGG could not be reached or the body could not be read.
    #[error("{0}")]
    Transport(String),
}

impl ForwardError {
    /// Returns true if the caller sent an unusable request.
    pub fn is_bad_request(&self) -> bool {
        matches!(self, Self::BadRequest(_))
    }
}
