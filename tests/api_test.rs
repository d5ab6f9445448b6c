use axum::http::StatusCode;
use axum_test::TestServer;
use httpmock::prelude::*;
use reel_fetch::config::toml_config::{DESKTOP_USER_AGENT, MOBILE_USER_AGENT};
use reel_fetch::{router, AppState, ServiceConfig};
use serde_json::{json, Value};

const REEL_URL: &str = "https://www.instagram.com/reel/Abc123/?igsh=xyz";

fn test_config(server: &MockServer) -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.endpoints.instagram_base = server.base_url();
    config.endpoints.relay_base = server.base_url();
    config.http.timeout_seconds = 5;
    config
}

fn test_server(config: ServiceConfig) -> TestServer {
    let state = AppState::from_config(config).unwrap();
    TestServer::new(router(state)).unwrap()
}

#[tokio::test]
async fn test_media_info_success() {
    let server = MockServer::start();
    let media_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1/media/Abc123/info/")
            .header("user-agent", MOBILE_USER_AGENT)
            .header("x-ig-app-id", "936619743392459");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({
                "items": [{
                    "video_versions": [{"url": "https://scontent.cdninstagram.com/reel.mp4"}],
                    "image_versions2": {"candidates": [{"url": "https://scontent.cdninstagram.com/reel.jpg"}]}
                }]
            }));
    });

    let app = test_server(test_config(&server));
    let response = app
        .post("/api/instagram")
        .json(&json!({ "url": REEL_URL }))
        .await;

    response.assert_status(StatusCode::OK);
    media_mock.assert();

    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["videoUrl"], "https://scontent.cdninstagram.com/reel.mp4");
    assert_eq!(body["data"]["thumbnailUrl"], "https://scontent.cdninstagram.com/reel.jpg");
    assert_eq!(body["data"]["shortcode"], "Abc123");
    assert_eq!(body["data"]["type"], "reel");
    assert_eq!(body["data"]["isVideo"], true);
    assert_eq!(body["data"]["filename"], "instagram_Abc123.mp4");
}

#[tokio::test]
async fn test_falls_back_to_embed_page() {
    let server = MockServer::start();
    let media_mock = server.mock(|when, then| {
        when.method(GET).path("/api/v1/media/Post42/info/");
        then.status(401);
    });
    let public_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/p/Post42/")
            .query_param("__a", "1")
            .query_param("__d", "dis");
        then.status(200)
            .header("Content-Type", "text/html")
            .body("<html>login required</html>");
    });
    let embed_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/p/Post42/embed/captioned/")
            .header("user-agent", DESKTOP_USER_AGENT);
        then.status(200)
            .header("Content-Type", "text/html")
            .body(r#"<meta property="og:image" content="https://cdn.example/t.jpg"><script>{"video_url":"https:\/\/cdn.example\/v.mp4?a=1&b=2"}</script>"#);
    });
    let relay_mock = server.mock(|when, then| {
        when.method(GET).path("/ig");
        then.status(200).json_body(json!({"video_url": "https://relay/never.mp4"}));
    });

    let app = test_server(test_config(&server));
    let response = app
        .post("/api/instagram")
        .json(&json!({ "url": "https://www.instagram.com/p/Post42/" }))
        .await;

    response.assert_status(StatusCode::OK);
    media_mock.assert();
    public_mock.assert();
    embed_mock.assert();
    assert_eq!(relay_mock.hits(), 0);

    let body: Value = response.json();
    assert_eq!(body["data"]["videoUrl"], "https://cdn.example/v.mp4?a=1&b=2");
    assert_eq!(body["data"]["thumbnailUrl"], "https://cdn.example/t.jpg");
    assert_eq!(body["data"]["type"], "post");
}

#[tokio::test]
async fn test_relay_receives_clean_url() {
    let server = MockServer::start();
    let relay_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/ig")
            .query_param("url", "https://www.instagram.com/reel/Abc123");
        then.status(200)
            .json_body(json!({"url": "https://relay.example/r.mp4", "thumbnail": "https://relay.example/r.jpg"}));
    });

    let mut config = test_config(&server);
    config.extraction.methods = vec!["external_service".to_string()];

    let app = test_server(config);
    let response = app
        .post("/api/instagram")
        .json(&json!({ "url": REEL_URL }))
        .await;

    response.assert_status(StatusCode::OK);
    relay_mock.assert();

    let body: Value = response.json();
    assert_eq!(body["data"]["videoUrl"], "https://relay.example/r.mp4");
    assert_eq!(body["data"]["thumbnailUrl"], "https://relay.example/r.jpg");
}

#[tokio::test]
async fn test_image_post_is_served_as_jpg() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/v1/media/Img1/info/");
        then.status(200).json_body(json!({
            "items": [{"image_versions2": {"candidates": [{"url": "https://scontent.cdninstagram.com/photo.jpg"}]}}]
        }));
    });

    let app = test_server(test_config(&server));
    let response = app
        .post("/api/instagram")
        .json(&json!({ "url": "https://www.instagram.com/p/Img1" }))
        .await;

    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["data"]["isVideo"], false);
    assert_eq!(body["data"]["filename"], "instagram_Img1.jpg");
    assert_eq!(body["data"]["videoUrl"], "https://scontent.cdninstagram.com/photo.jpg");
}

#[tokio::test]
async fn test_all_methods_fail_returns_404() {
    let server = MockServer::start();
    let catch_all = server.mock(|when, then| {
        when.method(GET);
        then.status(500);
    });

    let app = test_server(test_config(&server));
    let response = app
        .post("/api/instagram")
        .json(&json!({ "url": REEL_URL }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(catch_all.hits(), 4);

    let body: Value = response.json();
    assert_eq!(
        body["error"],
        "Could not extract video. Instagram may have restricted access to this content."
    );
    assert_eq!(
        body["suggestion"],
        "Try a different reel or make sure the account is public."
    );
}

#[tokio::test]
async fn test_request_validation() {
    let server = MockServer::start();
    let app = test_server(test_config(&server));

    let missing = app.post("/api/instagram").json(&json!({})).await;
    missing.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(missing.json::<Value>()["error"], "URL is required");

    let empty = app.post("/api/instagram").json(&json!({ "url": "" })).await;
    empty.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(empty.json::<Value>()["error"], "URL is required");

    let invalid = app
        .post("/api/instagram")
        .json(&json!({ "url": "https://www.instagram.com/stories/someone/123" }))
        .await;
    invalid.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(invalid.json::<Value>()["error"], "Invalid Instagram URL format");
}

#[tokio::test]
async fn test_malformed_body_is_server_error() {
    let server = MockServer::start();
    let app = test_server(test_config(&server));

    let response = app.post("/api/instagram").text("{not json").await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<Value>()["error"],
        "Server error while processing request. Please try again."
    );
}

#[tokio::test]
async fn test_non_object_json_body_is_missing_url() {
    let server = MockServer::start();
    let app = test_server(test_config(&server));

    for body in [r#""abc""#, "5", "[]", "null", r#"{"url": null}"#, r#"{"url": 0}"#] {
        let response = app.post("/api/instagram").text(body).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["error"], "URL is required", "body {body}");
    }
}

#[tokio::test]
async fn test_non_string_url_is_server_error() {
    let server = MockServer::start();
    let app = test_server(test_config(&server));

    let response = app.post("/api/instagram").json(&json!({ "url": 5 })).await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<Value>()["error"],
        "Server error while processing request. Please try again."
    );
}
