//! Host APIs for ShelfSpin.
//!
//! - [`http`] - HTTP client with tracing, bearer auth, and domain allowlist

pub mod http;

pub use http::HttpClient;
