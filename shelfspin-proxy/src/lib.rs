//! ShelfSpin proxy server library.
//!
//! A small axum server that relays BGG XML API requests with a bearer token
//! and serves the static front end. Exposes config, state, error handling and
//! routes so integration tests and the binary entrypoint share them.

pub mod config;
pub mod error;
pub mod router;
pub mod routes;
pub mod state;
