// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # ShelfSpin Fetch
//!
//! Everything between the client and the BGG XML API.
//!
//! ## Server side
//!
//! - [`forward::Forwarder`] - One bearer-authenticated GET to BGG, no retries
//! - [`host::http::HttpClient`] - HTTP client with tracing and domain allowlist
//!
//! ## Client side
//!
//! - [`transport::ProxyTransport`] - One GET through the proxy
//! - [`poll::Poller`] - Polls a URL until BGG stops answering "queued"
//! - [`retry::RetryPolicy`] - Attempt cap and delay schedule
//!
//! ## Example
//!
//! ```ignore
//! use shelfspin_core::NoProgress;
//! use shelfspin_fetch::{HttpClient, HttpProxyTransport, Poller};
//!
//! let transport = HttpProxyTransport::new(HttpClient::new()?, "http://localhost:3000")?;
//! let poller = Poller::new(transport);
//! let xml = poller
//!     .fetch("https://boardgamegeek.com/xmlapi2/thing?id=13", &NoProgress)
//!     .await?;
//! ```

pub mod error;
pub mod forward;
pub mod host;
pub mod poll;
pub mod retry;
pub mod transport;

// Re-export key types at crate root

// Errors
pub use error::{FetchError, ForwardError, HttpError};

// Host APIs
pub use host::http::HttpClient;

// Server side
pub use forward::{
    Forwarded, Forwarder, MISSING_URL_MESSAGE, PROXY_PATH, UPSTREAM_ERROR_PREFIX,
};

// Client side
pub use poll::{is_queued_body, Poller, QUEUED_SENTINEL};
pub use retry::RetryPolicy;
pub use transport::{DirectTransport, HttpProxyTransport, ProxyResponse, ProxyTransport};
