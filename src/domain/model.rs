use serde::{Deserialize, Serialize};

/// `POST /api/instagram` 的請求內容
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DownloadRequest {
    #[serde(default)]
    pub url: Option<String>,
}

/// 單一擷取方法的結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaCandidate {
    pub video_url: String,
    pub thumbnail_url: Option<String>,
    pub is_video: bool,
}

impl MediaCandidate {
    pub fn video(video_url: impl Into<String>, thumbnail_url: Option<String>) -> Self {
        Self {
            video_url: video_url.into(),
            thumbnail_url,
            is_video: true,
        }
    }

    /// Still images reuse the image URL as the download target.
    pub fn image(image_url: impl Into<String>) -> Self {
        let image_url = image_url.into();
        Self {
            video_url: image_url.clone(),
            thumbnail_url: Some(image_url),
            is_video: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Reel,
    Post,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaData {
    pub video_url: String,
    pub thumbnail_url: Option<String>,
    pub shortcode: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub is_video: bool,
    pub filename: String,
}

impl MediaData {
    pub fn new(candidate: MediaCandidate, shortcode: &str, content_type: ContentType) -> Self {
        let extension = if candidate.is_video { "mp4" } else { "jpg" };
        Self {
            video_url: candidate.video_url,
            thumbnail_url: candidate.thumbnail_url,
            shortcode: shortcode.to_string(),
            content_type,
            is_video: candidate.is_video,
            filename: format!("instagram_{}.{}", shortcode, extension),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
    pub data: MediaData,
}

impl From<MediaData> for SuccessResponse {
    fn from(data: MediaData) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// 第三方下載站的跳轉連結
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloaderLinks {
    pub primary: String,
    pub alternative: String,
}
