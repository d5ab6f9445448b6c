use axum::http::StatusCode;
use axum_test::TestServer;
use reel_fetch::{router, AppState, ServiceConfig};
use serde_json::Value;

fn test_server() -> TestServer {
    let state = AppState::from_config(ServiceConfig::default()).unwrap();
    TestServer::new(router(state)).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let server = test_server();
    let response = server.get("/health").await;

    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "reel-fetch");
    assert!(body["started_at"].is_string());
}

#[tokio::test]
async fn test_downloader_links() {
    let server = test_server();
    let response = server
        .get("/api/links")
        .add_query_param("url", "https://www.instagram.com/reel/Abc123/")
        .await;

    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(
        body["primary"],
        "https://snapinsta.app/download?url=https%3A%2F%2Fwww.instagram.com%2Freel%2FAbc123%2F"
    );
    assert_eq!(
        body["alternative"],
        "https://fastdl.app/en/?url=https%3A%2F%2Fwww.instagram.com%2Freel%2FAbc123%2F"
    );
}

#[tokio::test]
async fn test_downloader_links_validation() {
    let server = test_server();

    let missing = server.get("/api/links").await;
    missing.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(missing.json::<Value>()["error"], "Please enter an Instagram URL");

    let invalid = server
        .get("/api/links")
        .add_query_param("url", "https://vimeo.com/1")
        .await;
    invalid.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        invalid.json::<Value>()["error"],
        "Please enter a valid Instagram URL (Reel, Post, Story, or IGTV)"
    );
}

#[tokio::test]
async fn test_download_proxy_rejects_foreign_hosts() {
    let server = test_server();

    let foreign = server
        .get("/api/instagram/download")
        .add_query_param("url", "https://evil.example.com/payload.mp4")
        .await;
    foreign.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(
        foreign.json::<Value>()["error"],
        "Only Instagram media URLs can be downloaded"
    );

    let plain_http = server
        .get("/api/instagram/download")
        .add_query_param("url", "http://scontent.cdninstagram.com/v.mp4")
        .await;
    plain_http.assert_status(StatusCode::FORBIDDEN);

    let missing = server.get("/api/instagram/download").await;
    missing.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_pages_render_inside_layout() {
    let server = test_server();

    for path in [
        "/",
        "/about",
        "/contact",
        "/how-to-use",
        "/privacy-policy",
        "/terms-of-service",
    ] {
        let response = server.get(path).await;
        response.assert_status(StatusCode::OK);
        let html = response.text();
        assert!(html.contains("<header>"), "{path} is missing the header");
        assert!(html.contains("Not affiliated with Instagram"), "{path} is missing the footer");
    }

    let home = server.get("/").await.text();
    assert!(home.contains("Paste Instagram URL here..."));
}

#[tokio::test]
async fn test_unknown_page_is_404() {
    let server = test_server();
    let response = server.get("/does-not-exist").await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert!(response.text().contains("Page not found"));
}
