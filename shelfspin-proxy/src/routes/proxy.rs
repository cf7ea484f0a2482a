//! The BGG proxy endpoint.

use axum::extract::{Query, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{routing::get, Router};
use serde::Deserialize;
use shelfspin_fetch::PROXY_PATH;

use crate::error::AppResult;
use crate::state::AppState;

/// Query string of the proxy endpoint.
#[derive(Debug, Deserialize)]
pub struct ProxyQuery {
    /// Absolute BGG URL to fetch.
    pub url: Option<String>,
}

/// GET /api/bgg-proxy?url=... -- relays one BGG request with the bearer token.
///
/// Any upstream 2xx is answered with `200` and the body verbatim.
async fn bgg_proxy(
    State(state): State<AppState>,
    Query(query): Query<ProxyQuery>,
) -> AppResult<Response> {
    let forwarded = state.forwarder.forward(query.url.as_deref()).await?;
    Ok((StatusCode::OK, [(CONTENT_TYPE, "application/xml")], forwarded.body).into_response())
}

/// Mount the proxy route.
pub fn router() -> Router<AppState> {
    Router::new().route(PROXY_PATH, get(bgg_proxy))
}
