//! Server-side forwarding to the BGG XML API.
//!
//! The [`Forwarder`] is the whole of the proxy's behaviour: validate the
//! target, attach the bearer token, make one request, and hand back the
//! body. It never retries; polling is the client's job.

use tracing::{debug, error, info, instrument};

use crate::error::{ForwardError, HttpError};
use crate::host::http::HttpClient;

/// Path the proxy endpoint is mounted at.
pub const PROXY_PATH: &str = "/api/bgg-proxy";

/// Prefix of every upstream failure message the proxy returns.
pub const UPSTREAM_ERROR_PREFIX: &str = "Error fetching from BGG API";

/// Message returned when no target URL is supplied.
pub const MISSING_URL_MESSAGE: &str = "URL parameter is required";

/// A successfully relayed upstream response.
///
/// Every upstream 2xx is relayed as a `200`; a queued `202` is recognised
/// by its body, not its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Forwarded {
    /// Upstream 2xx status code.
    pub upstream_status: u16,
    /// Upstream body, verbatim.
    pub body: String,
}

impl Forwarded {
    /// Status the proxy answers with for every relayed response.
    pub const STATUS: u16 = 200;
}

/// Forwards single GET requests to BGG with a bearer token.
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: HttpClient,
    token: Option<String>,
}

impl Forwarder {
    /// Creates a forwarder. Blank tokens are treated as absent.
    pub fn new(client: HttpClient, token: Option<String>) -> Self {
        let token = token.filter(|t| !t.trim().is_empty());
        if token.is_none() {
            info!("No BGG API token configured; requests will be sent unauthenticated");
        }
        Self { client, token }
    }

    /// Returns true if a bearer token will be attached.
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Forwards one GET request to `target`.
    ///
    /// # Errors
    ///
    /// - [`ForwardError::BadRequest`] if `target` is missing, empty, not an
    ///   absolute URL, or outside the allowlist.
    /// - [`ForwardError::UpstreamStatus`] if BGG answers with a non-2xx status.
    /// - [`ForwardError::Transport`] if BGG cannot be reached.
    #[instrument(skip(self))]
    pub async fn forward(&self, target: Option<&str>) -> Result<Forwarded, ForwardError> {
        let Some(target) = target.map(str::trim).filter(|t| !t.is_empty()) else {
            error!("URL parameter is missing");
            return Err(ForwardError::BadRequest(MISSING_URL_MESSAGE.to_string()));
        };

        debug!(target = %target, "Proxying request");

        let response = self
            .client
            .get_with_bearer(target, self.token.as_deref())
            .await
            .map_err(|e| match e {
                HttpError::InvalidUrl(_) | HttpError::DomainNotAllowed(_) => {
                    ForwardError::BadRequest(e.to_string())
                }
                HttpError::Request(inner) => {
                    error!(error = %inner, "Request to BGG failed");
                    ForwardError::Transport(inner.to_string())
                }
            })?;

        let status = response.status();
        info!(status = status.as_u16(), "Fetched from BGG API");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), body = %body, "BGG API returned an error status");
            return Err(ForwardError::UpstreamStatus(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ForwardError::Transport(e.to_string()))?;

        Ok(Forwarded {
            upstream_status: status.as_u16(),
            body,
        })
    }
}
