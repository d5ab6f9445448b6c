use crate::utils::error::{FetchError, Result};

/// 表單可接受的網址片段（含限時動態與短網址）
const SUPPORTED_FRAGMENTS: [&str; 6] = [
    "instagram.com/p/",
    "instagram.com/reel/",
    "instagram.com/reels/",
    "instagram.com/stories/",
    "instagram.com/tv/",
    "instagr.am/",
];

pub fn is_valid_instagram_url(url: &str) -> bool {
    SUPPORTED_FRAGMENTS
        .iter()
        .any(|fragment| url.contains(fragment))
}

/// Form-level check. Returns the trimmed URL when it looks like Instagram content.
pub fn check_form_url(input: &str) -> Result<&str> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(FetchError::bad_request("Please enter an Instagram URL"));
    }

    if !is_valid_instagram_url(trimmed) {
        return Err(FetchError::bad_request(
            "Please enter a valid Instagram URL (Reel, Post, Story, or IGTV)",
        ));
    }

    Ok(trimmed)
}
