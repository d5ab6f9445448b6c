use crate::domain::model::ContentType;
use crate::utils::error::{FetchError, Result};
use once_cell::sync::Lazy;
use regex::Regex;

static SHORTCODE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/(p|reel|reels|tv)/([A-Za-z0-9_-]+)").expect("shortcode regex")
});

/// URL path segment that precedes the shortcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostKind {
    Post,
    Reel,
    Reels,
    Tv,
}

impl PostKind {
    fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "p" => Some(PostKind::Post),
            "reel" => Some(PostKind::Reel),
            "reels" => Some(PostKind::Reels),
            "tv" => Some(PostKind::Tv),
            _ => None,
        }
    }

    pub fn content_type(self) -> ContentType {
        match self {
            PostKind::Reel | PostKind::Reels => ContentType::Reel,
            PostKind::Post | PostKind::Tv => ContentType::Post,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUrl {
    /// 去掉 query string 與結尾斜線後的網址
    pub clean_url: String,
    pub shortcode: String,
    pub kind: PostKind,
}

/// 從 Instagram 網址取出 shortcode
pub fn parse(url: &str) -> Result<ParsedUrl> {
    let without_query = url.split('?').next().unwrap_or_default();
    let clean_url = without_query
        .strip_suffix('/')
        .unwrap_or(without_query)
        .to_string();

    let caps = SHORTCODE_RE
        .captures(&clean_url)
        .ok_or_else(|| FetchError::bad_request("Invalid Instagram URL format"))?;

    let kind = PostKind::from_segment(&caps[1])
        .ok_or_else(|| FetchError::bad_request("Invalid Instagram URL format"))?;
    let shortcode = caps[2].to_string();

    Ok(ParsedUrl {
        clean_url,
        shortcode,
        kind,
    })
}
