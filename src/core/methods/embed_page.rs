use crate::domain::model::MediaCandidate;
use crate::domain::ports::ExtractionMethod;
use crate::domain::shortcode::ParsedUrl;
use crate::utils::error::Result;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;

/// 依序嘗試的影片網址樣式
static VIDEO_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r#""video_url":"([^"]+)""#,
        r#"video_url\\?":\\?"([^"\\]+)"#,
        r#"(?i)src="([^"]*\.mp4[^"]*)""#,
        r#"data-video-url="([^"]+)""#,
    ]
    .iter()
    .map(|p| Regex::new(p).expect("embed video regex"))
    .collect()
});

static OG_IMAGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"property="og:image"[^>]*content="([^"]+)""#).expect("og:image regex")
});

/// Scrapes `/p/{shortcode}/embed/captioned/` with a desktop browser user agent.
pub struct EmbedPageMethod {
    client: Client,
    base_url: String,
    user_agent: String,
}

impl EmbedPageMethod {
    pub fn new(client: Client, base_url: &str, user_agent: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            user_agent: user_agent.to_string(),
        }
    }
}

#[async_trait]
impl ExtractionMethod for EmbedPageMethod {
    fn name(&self) -> &'static str {
        "embed_page"
    }

    async fn extract(&self, target: &ParsedUrl) -> Result<Option<MediaCandidate>> {
        let url = format!("{}/p/{}/embed/captioned/", self.base_url, target.shortcode);
        tracing::debug!("📡 embed_page: GET {}", url);

        let response = self
            .client
            .get(&url)
            .header("User-Agent", &self.user_agent)
            .header("Accept", "text/html")
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::debug!("embed_page: status {} for {}", response.status(), target.shortcode);
            return Ok(None);
        }

        let html = response.text().await?;
        tracing::debug!("embed_page: html_len={} for {}", html.len(), target.shortcode);
        Ok(parse_embed_html(&html))
    }
}

pub fn parse_embed_html(html: &str) -> Option<MediaCandidate> {
    let video_url = VIDEO_PATTERNS
        .iter()
        .find_map(|re| re.captures(html))
        .map(|caps| unescape_video_url(&caps[1]))?;

    let thumbnail_url = OG_IMAGE_RE.captures(html).map(|caps| caps[1].to_string());

    Some(MediaCandidate::video(video_url, thumbnail_url))
}

/// 還原嵌入 JSON 裡被跳脫的網址
pub fn unescape_video_url(raw: &str) -> String {
    raw.replace("\\u0026", "&")
        .replace('\\', "")
        .replace("&amp;", "&")
}
