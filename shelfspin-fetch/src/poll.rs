//! Polling engine for BGG's queued responses.
//!
//! BGG answers some requests with "accepted, come back later" instead of
//! data: usually a `202`, sometimes a `200` whose body is a short message.
//! The [`Poller`] keeps asking, with a pause between attempts, until it
//! gets a real document or runs out of attempts.

use shelfspin_core::{FetchProgress, ProgressSink, RetryReason};
use tracing::{debug, instrument, warn};

use crate::error::FetchError;
use crate::retry::RetryPolicy;
use crate::transport::{ProxyResponse, ProxyTransport};

/// Text BGG puts in a `200` body when it has only queued the request.
pub const QUEUED_SENTINEL: &str = "Your request for collection has been accepted";

/// Returns true if a response body is BGG's "request queued" message
/// rather than data.
pub fn is_queued_body(body: &str) -> bool {
    body.contains(QUEUED_SENTINEL)
}

/// What a single proxy response means for the polling loop.
enum Attempt {
    Ready(String),
    Rejected(String),
    Retry(RetryReason),
}

fn classify(response: ProxyResponse) -> Attempt {
    match response.status {
        200 if is_queued_body(&response.body) => Attempt::Retry(RetryReason::Queued),
        200 => Attempt::Ready(response.body),
        202 => Attempt::Retry(RetryReason::Queued),
        400 => Attempt::Rejected(response.body),
        status => Attempt::Retry(RetryReason::ErrorStatus(status)),
    }
}

/// Fetches one BGG URL through a [`ProxyTransport`], polling while BGG
/// reports the request as queued.
#[derive(Debug, Clone)]
pub struct Poller<T> {
    transport: T,
    policy: RetryPolicy,
}

impl<T: ProxyTransport> Poller<T> {
    /// Creates a poller with the default policy (5 attempts, 5 s apart).
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            policy: RetryPolicy::default(),
        }
    }

    /// Replaces the retry policy.
    #[must_use]
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Fetches `target_url` and returns the body of the first genuine `200`.
    ///
    /// Every failed attempt is reported to `progress` before the wait. No
    /// wait follows the final attempt.
    ///
    /// # Errors
    ///
    /// - [`FetchError::BadRequest`] immediately if the proxy answers `400`.
    /// - [`FetchError::RetryExhausted`] once the attempt cap is reached.
    #[instrument(skip(self, progress), fields(max_attempts = self.policy.max_attempts))]
    pub async fn fetch(
        &self,
        target_url: &str,
        progress: &dyn ProgressSink,
    ) -> Result<String, FetchError> {
        let max_attempts = self.policy.max_attempts;
        let mut attempts = 0;

        while attempts < max_attempts {
            let reason = match self.transport.get(target_url).await {
                Ok(response) => match classify(response) {
                    Attempt::Ready(body) => {
                        debug!(attempt = attempts + 1, len = body.len(), "Fetched document");
                        return Ok(body);
                    }
                    Attempt::Rejected(message) => {
                        warn!(message = %message, "Proxy rejected request");
                        return Err(FetchError::BadRequest(message));
                    }
                    Attempt::Retry(reason) => reason,
                },
                Err(e) => RetryReason::Network(e.to_string()),
            };

            attempts += 1;
            warn!(attempt = attempts, max_attempts, reason = ?reason, "Attempt did not return data");
            progress.report(&FetchProgress::Retrying {
                attempt: attempts,
                max_attempts,
                reason,
            });

            if attempts < max_attempts {
                tokio::time::sleep(self.policy.delay_for_attempt(attempts)).await;
            }
        }

        Err(FetchError::RetryExhausted { attempts })
    }
}
