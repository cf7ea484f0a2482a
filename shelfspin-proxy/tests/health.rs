//! Integration tests for the health check endpoint and static file serving.

mod common;

use axum::http::StatusCode;
use common::{body_json, body_text, build_test_app, get, test_config};
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Test: GET /health returns 200 with expected JSON fields
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_check_returns_ok_with_json() {
    let dir = TempDir::new().unwrap();
    let app = build_test_app(test_config(dir.path()));

    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["token_configured"], false);
}

#[tokio::test]
async fn health_check_reports_token() {
    let dir = TempDir::new().unwrap();
    let mut config = test_config(dir.path());
    config.bgg_api_token = Some("secret".to_string());
    let app = build_test_app(config);

    let json = body_json(get(app, "/health").await).await;

    assert_eq!(json["token_configured"], true);
}

// ---------------------------------------------------------------------------
// Test: static files are served from the configured directory
// ---------------------------------------------------------------------------

#[tokio::test]
async fn root_serves_index_html() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>ShelfSpin</h1>").unwrap();
    let app = build_test_app(test_config(dir.path()));

    let response = get(app, "/").await;

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));
    assert_eq!(body_text(response).await, "<h1>ShelfSpin</h1>");
}

#[tokio::test]
async fn script_has_javascript_content_type() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("js")).unwrap();
    std::fs::write(dir.path().join("js/script.js"), "console.log(1);").unwrap();
    let app = build_test_app(test_config(dir.path()));

    let response = get(app, "/js/script.js").await;

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.contains("javascript"));
}

// ---------------------------------------------------------------------------
// Test: unknown paths return 404
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_file_returns_404() {
    let dir = TempDir::new().unwrap();
    let app = build_test_app(test_config(dir.path()));

    let response = get(app, "/this-file-does-not-exist.css").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_text(response).await, "404 Not Found");
}
