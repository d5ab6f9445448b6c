use super::{present, str_field};
use crate::core::links::encode_uri_component;
use crate::domain::model::MediaCandidate;
use crate::domain::ports::ExtractionMethod;
use crate::domain::shortcode::ParsedUrl;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

/// 最後手段：第三方轉址服務
pub struct ExternalServiceMethod {
    client: Client,
    base_url: String,
}

impl ExternalServiceMethod {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ExtractionMethod for ExternalServiceMethod {
    fn name(&self) -> &'static str {
        "external_service"
    }

    async fn extract(&self, target: &ParsedUrl) -> Result<Option<MediaCandidate>> {
        let url = format!(
            "{}/ig?url={}",
            self.base_url,
            encode_uri_component(&target.clean_url)
        );
        tracing::debug!("📡 external_service: GET {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::debug!("external_service: status {}", response.status());
            return Ok(None);
        }

        let data: Value = response.json().await?;
        Ok(parse_relay_response(&data))
    }
}

pub fn parse_relay_response(data: &Value) -> Option<MediaCandidate> {
    if present(data, "error").is_some() {
        return None;
    }

    let video_url = str_field(data, "video_url").or_else(|| str_field(data, "url"))?;
    let thumbnail_url =
        str_field(data, "thumbnail_url").or_else(|| str_field(data, "thumbnail"));

    Some(MediaCandidate::video(video_url, thumbnail_url))
}
