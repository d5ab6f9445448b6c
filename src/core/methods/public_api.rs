use super::{first_video_version, present, str_field, IG_APP_ID};
use crate::domain::model::MediaCandidate;
use crate::domain::ports::ExtractionMethod;
use crate::domain::shortcode::ParsedUrl;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

/// 公開的 `?__a=1&__d=dis` JSON 端點
pub struct PublicApiMethod {
    client: Client,
    base_url: String,
    user_agent: String,
}

impl PublicApiMethod {
    pub fn new(client: Client, base_url: &str, user_agent: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            user_agent: user_agent.to_string(),
        }
    }
}

#[async_trait]
impl ExtractionMethod for PublicApiMethod {
    fn name(&self) -> &'static str {
        "public_api"
    }

    async fn extract(&self, target: &ParsedUrl) -> Result<Option<MediaCandidate>> {
        let url = format!("{}/p/{}/", self.base_url, target.shortcode);
        tracing::debug!("📡 public_api: GET {}?__a=1&__d=dis", url);

        let response = self
            .client
            .get(&url)
            .query(&[("__a", "1"), ("__d", "dis")])
            .header("User-Agent", &self.user_agent)
            .header("Accept", "application/json")
            .header("X-IG-App-ID", IG_APP_ID)
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::debug!("public_api: status {} for {}", response.status(), target.shortcode);
            return Ok(None);
        }

        let data: Value = response.json().await?;
        Ok(parse_public_api(&data))
    }
}

/// Media node is either `graphql.shortcode_media` or `items[0]`.
pub fn parse_public_api(data: &Value) -> Option<MediaCandidate> {
    let media = data
        .get("graphql")
        .and_then(|g| present(g, "shortcode_media"))
        .or_else(|| {
            data.get("items")
                .and_then(|i| i.as_array())
                .and_then(|items| items.first())
                .filter(|m| !m.is_null())
        })?;

    let video_url = str_field(media, "video_url").or_else(|| first_video_version(media));
    let thumbnail_url =
        str_field(media, "display_url").or_else(|| str_field(media, "thumbnail_url"));

    match (video_url, thumbnail_url) {
        (Some(video_url), thumbnail_url) => Some(MediaCandidate::video(video_url, thumbnail_url)),
        (None, Some(thumbnail_url)) => Some(MediaCandidate {
            video_url: thumbnail_url.clone(),
            thumbnail_url: Some(thumbnail_url),
            is_video: false,
        }),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_graphql_video() {
        let data = json!({
            "graphql": {"shortcode_media": {
                "video_url": "https://cdn/v.mp4",
                "display_url": "https://cdn/d.jpg"
            }}
        });

        let candidate = parse_public_api(&data).unwrap();
        assert!(candidate.is_video);
        assert_eq!(candidate.video_url, "https://cdn/v.mp4");
        assert_eq!(candidate.thumbnail_url.as_deref(), Some("https://cdn/d.jpg"));
    }

    #[test]
    fn test_parse_items_video_versions() {
        let data = json!({
            "items": [{
                "video_versions": [{"url": "https://cdn/item.mp4"}],
                "thumbnail_url": "https://cdn/thumb.jpg"
            }]
        });

        let candidate = parse_public_api(&data).unwrap();
        assert_eq!(candidate.video_url, "https://cdn/item.mp4");
        assert_eq!(candidate.thumbnail_url.as_deref(), Some("https://cdn/thumb.jpg"));
    }

    #[test]
    fn test_parse_image_falls_back_to_display_url() {
        let data = json!({"graphql": {"shortcode_media": {"display_url": "https://cdn/d.jpg"}}});

        let candidate = parse_public_api(&data).unwrap();
        assert!(!candidate.is_video);
        assert_eq!(candidate.video_url, "https://cdn/d.jpg");
    }

    #[test]
    fn test_parse_video_without_thumbnail() {
        let data = json!({"items": [{"video_url": "https://cdn/v.mp4"}]});

        let candidate = parse_public_api(&data).unwrap();
        assert!(candidate.is_video);
        assert!(candidate.thumbnail_url.is_none());
    }

    #[test]
    fn test_parse_nothing_usable() {
        assert!(parse_public_api(&json!({"graphql": {}})).is_none());
        assert!(parse_public_api(&json!({"items": [{"id": "1"}]})).is_none());
        assert!(parse_public_api(&json!({"require_login": true})).is_none());
    }
}
