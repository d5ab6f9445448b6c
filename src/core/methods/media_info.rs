use super::{first_image_candidate, first_video_version, present, IG_APP_ID};
use crate::domain::model::MediaCandidate;
use crate::domain::ports::ExtractionMethod;
use crate::domain::shortcode::ParsedUrl;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

/// `/api/v1/media/{shortcode}/info/`，使用行動版 App 的標頭
pub struct MediaInfoMethod {
    client: Client,
    base_url: String,
    user_agent: String,
}

impl MediaInfoMethod {
    pub fn new(client: Client, base_url: &str, user_agent: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            user_agent: user_agent.to_string(),
        }
    }
}

#[async_trait]
impl ExtractionMethod for MediaInfoMethod {
    fn name(&self) -> &'static str {
        "media_info"
    }

    async fn extract(&self, target: &ParsedUrl) -> Result<Option<MediaCandidate>> {
        let url = format!("{}/api/v1/media/{}/info/", self.base_url, target.shortcode);
        let origin = format!("{}/", self.base_url);
        tracing::debug!("📡 media_info: GET {}", url);

        let response = self
            .client
            .get(&url)
            .header("User-Agent", &self.user_agent)
            .header("Accept", "*/*")
            .header("Accept-Language", "en-US,en;q=0.9")
            .header("X-IG-App-ID", IG_APP_ID)
            .header("X-ASBD-ID", "198387")
            .header("X-IG-WWW-Claim", "0")
            .header("Origin", &self.base_url)
            .header("Referer", &origin)
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::debug!("media_info: status {} for {}", response.status(), target.shortcode);
            return Ok(None);
        }

        let data: Value = response.json().await?;
        Ok(parse_media_info(&data))
    }
}

/// Reads `items[0]` of a media info payload.
pub fn parse_media_info(data: &Value) -> Option<MediaCandidate> {
    let item = data
        .get("items")
        .and_then(|i| i.as_array())
        .and_then(|items| items.first())
        .filter(|item| !item.is_null())?;

    if present(item, "video_versions").is_some() {
        let video_url = first_video_version(item)?;
        return Some(MediaCandidate::video(video_url, first_image_candidate(item)));
    }

    if let Some(carousel) = present(item, "carousel_media").and_then(|c| c.as_array()) {
        // 輪播貼文：取第一個影片，沒有影片就退回第一張圖
        return match carousel
            .iter()
            .find(|m| present(m, "video_versions").is_some())
        {
            Some(video) => {
                let video_url = first_video_version(video)?;
                Some(MediaCandidate::video(video_url, first_image_candidate(video)))
            }
            None => carousel
                .first()
                .and_then(first_image_candidate)
                .map(MediaCandidate::image),
        };
    }

    if present(item, "image_versions2").is_some() {
        return first_image_candidate(item).map(MediaCandidate::image);
    }

    None
}
