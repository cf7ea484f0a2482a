#![allow(dead_code)]

use std::path::Path;

use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::response::Response;
use axum::routing::get as route_get;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use shelfspin_proxy::config::ProxyConfig;
use shelfspin_proxy::router::build_app_router;
use shelfspin_proxy::state::AppState;

pub const COLLECTION_XML: &str =
    r#"<?xml version="1.0" encoding="utf-8"?><items totalitems="1"><item objectid="13"><name>Catan</name><numplays>0</numplays></item></items>"#;

/// Build a test `ProxyConfig`: no allowlist, no token, short timeouts.
pub fn test_config(static_dir: &Path) -> ProxyConfig {
    ProxyConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        bgg_api_token: None,
        static_dir: static_dir.to_path_buf(),
        request_timeout_secs: 30,
        upstream_timeout_secs: 5,
        allowed_hosts: Vec::new(),
    }
}

/// Build the full application router from `config`.
pub fn build_test_app(config: ProxyConfig) -> Router {
    let state = AppState::from_config(config).expect("HTTP client should build");
    build_app_router(state)
}

/// Echoes the authorization header so tests can see what the proxy sent.
async fn collection(headers: HeaderMap) -> (StatusCode, HeaderMap, &'static str) {
    let mut echo = HeaderMap::new();
    if let Some(auth) = headers.get("authorization") {
        echo.insert("x-seen-authorization", auth.clone());
    }
    (StatusCode::OK, echo, COLLECTION_XML)
}

/// Start a throwaway upstream on a random local port and return its base URL.
pub async fn spawn_upstream() -> String {
    let app = Router::new()
        .route("/xmlapi2/collection", route_get(collection))
        .route(
            "/xmlapi2/queued",
            route_get(|| async { (StatusCode::ACCEPTED, "<message>Your request for collection has been accepted</message>") }),
        )
        .route("/xmlapi2/down", route_get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "busy") }))
        .route("/xmlapi2/unauthorized", route_get(|| async { (StatusCode::UNAUTHORIZED, "no token") }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Proxy path for `target`, with the target form-encoded.
pub fn proxy_path(target: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(target.as_bytes()).collect();
    format!("/api/bgg-proxy?url={encoded}")
}

/// Send a GET request to `uri`.
pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Collect a response body as UTF-8 text.
pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
