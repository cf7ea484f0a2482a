//! How the client reaches the proxy.
//!
//! [`ProxyTransport`] is the seam the polling engine talks to. It makes one
//! request per call and reports the proxy's status and body without
//! interpreting them.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, instrument};
use url::Url;

use crate::error::{ForwardError, HttpError};
use crate::forward::{Forwarded, Forwarder, PROXY_PATH, UPSTREAM_ERROR_PREFIX};
use crate::host::http::HttpClient;

/// Raw response from the proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: String,
}

impl ProxyResponse {
    /// Creates a response.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// One GET through the proxy for a BGG target URL.
#[async_trait]
pub trait ProxyTransport: Send + Sync {
    /// Requests `target_url` through the proxy.
    ///
    /// # Errors
    ///
    /// Returns an error only if no response was received at all.
    async fn get(&self, target_url: &str) -> Result<ProxyResponse, HttpError>;
}

#[async_trait]
impl<T: ProxyTransport + ?Sized> ProxyTransport for Arc<T> {
    async fn get(&self, target_url: &str) -> Result<ProxyResponse, HttpError> {
        (**self).get(target_url).await
    }
}

// ============================================================================
// HTTP Proxy Transport
// ============================================================================

/// Talks to a running proxy over HTTP.
#[derive(Debug, Clone)]
pub struct HttpProxyTransport {
    client: HttpClient,
    endpoint: Url,
}

impl HttpProxyTransport {
    /// Creates a transport for the proxy at `base_url` (e.g.
    /// `http://localhost:3000`).
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidUrl`] if `base_url` is not absolute.
    pub fn new(client: HttpClient, base_url: &str) -> Result<Self, HttpError> {
        let endpoint = Url::parse(base_url)
            .and_then(|base| base.join(PROXY_PATH))
            .map_err(|e| HttpError::InvalidUrl(format!("{base_url}: {e}")))?;
        Ok(Self { client, endpoint })
    }

    /// The full proxy URL for a BGG target.
    pub fn proxy_url(&self, target_url: &str) -> String {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("url", target_url);
        url.into()
    }
}

#[async_trait]
impl ProxyTransport for HttpProxyTransport {
    #[instrument(skip(self))]
    async fn get(&self, target_url: &str) -> Result<ProxyResponse, HttpError> {
        let response = self.client.get(&self.proxy_url(target_url)).await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(status, len = body.len(), "Proxy responded");
        Ok(ProxyResponse { status, body })
    }
}

// ============================================================================
// In-Process Transport
// ============================================================================

/// Runs the forwarder in-process instead of calling a proxy server.
///
/// Errors are rendered exactly as the proxy endpoint renders them, so the
/// polling engine sees the same statuses either way.
#[derive(Debug, Clone)]
pub struct DirectTransport {
    forwarder: Arc<Forwarder>,
}

impl DirectTransport {
    /// Wraps a forwarder.
    pub fn new(forwarder: Arc<Forwarder>) -> Self {
        Self { forwarder }
    }
}

#[async_trait]
impl ProxyTransport for DirectTransport {
    async fn get(&self, target_url: &str) -> Result<ProxyResponse, HttpError> {
        let response = match self.forwarder.forward(Some(target_url)).await {
            Ok(forwarded) => ProxyResponse::new(Forwarded::STATUS, forwarded.body),
            Err(err @ ForwardError::BadRequest(_)) => ProxyResponse::new(400, err.to_string()),
            Err(err) => ProxyResponse::new(500, format!("{UPSTREAM_ERROR_PREFIX}: {err}")),
        };
        Ok(response)
    }
}
