use crate::api::AppState;
use crate::core::download::{content_disposition, sanitize_filename, MediaHostPolicy};
use crate::core::links;
use crate::core::methods::is_truthy;
use crate::domain::model::{DownloadRequest, DownloaderLinks, MediaData, SuccessResponse};
use crate::domain::ports::ConfigProvider;
use crate::domain::shortcode;
use crate::utils::error::{FetchError, Result};
use axum::{
    body::{Body, Bytes},
    extract::{Query, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const NOT_FOUND_MESSAGE: &str =
    "Could not extract video. Instagram may have restricted access to this content.";
pub const NOT_FOUND_SUGGESTION: &str = "Try a different reel or make sure the account is public.";

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub started_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Deserialize)]
pub struct LinksQuery {
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DownloadQuery {
    pub url: Option<String>,
    pub filename: Option<String>,
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        started_at: state.started_at,
    })
}

/// `POST /api/instagram`
///
/// The body is parsed by hand so that a malformed payload maps to the generic
/// server error the front-end expects, not to axum's rejection text.
/// Valid JSON without a truthy `url` (including non-object bodies) is a 400.
pub async fn resolve_media(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SuccessResponse>> {
    let payload: Value = serde_json::from_slice(&body)?;
    if !payload.get("url").is_some_and(is_truthy) {
        return Err(FetchError::bad_request("URL is required"));
    }

    // 非字串的 url 仍視為伺服器錯誤
    let request: DownloadRequest = serde_json::from_value(payload)?;
    let url = request
        .url
        .filter(|u| !u.is_empty())
        .ok_or_else(|| FetchError::bad_request("URL is required"))?;

    let target = shortcode::parse(&url)?;
    tracing::info!(
        shortcode = %target.shortcode,
        kind = ?target.kind,
        "🔍 Resolving Instagram media"
    );

    let outcome = state
        .chain
        .run(&target)
        .await
        .ok_or_else(|| FetchError::NotFound {
            message: NOT_FOUND_MESSAGE.to_string(),
            suggestion: Some(NOT_FOUND_SUGGESTION.to_string()),
        })?;

    let data = MediaData::new(
        outcome.candidate,
        &target.shortcode,
        target.kind.content_type(),
    );
    tracing::info!(
        shortcode = %data.shortcode,
        method = outcome.method,
        filename = %data.filename,
        "Media resolved"
    );

    Ok(Json(SuccessResponse::from(data)))
}

/// `GET /api/links?url=` — third-party downloader hand-off links.
pub async fn downloader_links(
    State(state): State<AppState>,
    Query(query): Query<LinksQuery>,
) -> Result<Json<DownloaderLinks>> {
    let (primary, alternative) = state.config.downloader_bases();
    let links = links::downloader_links(query.url.as_deref().unwrap_or_default(), primary, alternative)?;
    Ok(Json(links))
}

/// `GET /api/instagram/download?url=&filename=` — streams the media as an attachment.
pub async fn download_media(
    State(state): State<AppState>,
    Query(query): Query<DownloadQuery>,
) -> Result<Response> {
    let raw_url = query
        .url
        .filter(|u| !u.is_empty())
        .ok_or_else(|| FetchError::bad_request("URL is required"))?;

    let target = MediaHostPolicy::from_config(state.config.as_ref()).validate(&raw_url)?;
    let filename = sanitize_filename(query.filename.as_deref());

    tracing::debug!("⬇️ Proxying {} as {}", target.host_str().unwrap_or_default(), filename);

    let upstream = state.download_client.get(target).send().await?;
    if !upstream.status().is_success() {
        return Err(FetchError::UpstreamError {
            service: "media host".to_string(),
            status: upstream.status().as_u16(),
        });
    }

    let content_type = upstream
        .headers()
        .get(header::CONTENT_TYPE)
        .cloned()
        .unwrap_or_else(|| header::HeaderValue::from_static("application/octet-stream"));
    let content_length = upstream.headers().get(header::CONTENT_LENGTH).cloned();

    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_DISPOSITION, content_disposition(&filename))
        .header(header::CACHE_CONTROL, "no-store");
    if let Some(length) = content_length {
        builder = builder.header(header::CONTENT_LENGTH, length);
    }

    builder
        .body(Body::from_stream(upstream.bytes_stream()))
        .map_err(|e| FetchError::ProcessingError {
            message: format!("Failed to build download response: {}", e),
        })
}
