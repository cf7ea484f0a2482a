use std::sync::Arc;
use std::time::Duration;

use shelfspin_fetch::{Forwarder, HttpClient, HttpError};

use crate::config::ProxyConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; both fields are behind `Arc` and never mutated.
#[derive(Clone)]
pub struct AppState {
    /// Forwards proxied requests to BGG.
    pub forwarder: Arc<Forwarder>,
    /// Server configuration.
    pub config: Arc<ProxyConfig>,
}

impl AppState {
    /// Builds the upstream client and forwarder from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the HTTP client cannot be created.
    pub fn from_config(config: ProxyConfig) -> Result<Self, HttpError> {
        let client = HttpClient::with_timeout(Duration::from_secs(config.upstream_timeout_secs))?
            .with_allowed_domains(config.allowed_hosts.clone());
        let forwarder = Forwarder::new(client, config.bgg_api_token.clone());

        Ok(Self {
            forwarder: Arc::new(forwarder),
            config: Arc::new(config),
        })
    }
}
