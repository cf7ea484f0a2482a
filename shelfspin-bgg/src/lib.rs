// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # ShelfSpin BGG
//!
//! BoardGameGeek specifics for ShelfSpin:
//!
//! - **Endpoints**: collection and thing URLs for the XML API v2
//! - **Parser**: unplayed items and player counts from BGG XML
//! - **Client**: assembles a [`shelfspin_core::FetchSession`] for a username
//!
//! ## Usage
//!
//! ```ignore
//! use shelfspin_bgg::CollectionClient;
//! use shelfspin_core::NoProgress;
//! use shelfspin_fetch::{HttpClient, HttpProxyTransport, Poller};
//! use shelfspin_store::SessionStore;
//!
//! let transport = HttpProxyTransport::new(HttpClient::new()?, "http://localhost:3000")?;
//! let client = CollectionClient::new(Poller::new(transport));
//! let store = SessionStore::new();
//! let session = client.load_session(&store, "alice", &NoProgress).await?;
//! ```

pub mod client;
pub mod endpoints;
pub mod parser;


pub use client::{CollectionClient, DETAIL_BATCH_DELAY, DETAIL_BATCH_SIZE};
pub use endpoints::{BggEndpoints, CollectionKind, BGG_XMLAPI2_URL};
pub use parser::{ensure_document, parse_collection, parse_details};
