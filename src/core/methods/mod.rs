pub mod embed_page;
pub mod external_service;
pub mod media_info;
pub mod public_api;

pub use embed_page::EmbedPageMethod;
pub use external_service::ExternalServiceMethod;
pub use media_info::MediaInfoMethod;
pub use public_api::PublicApiMethod;

use serde_json::Value;

/// Instagram app id sent by the web client.
pub const IG_APP_ID: &str = "936619743392459";

/// 取出非 null、非空字串的欄位，模擬前端的 truthy 判斷
pub(crate) fn present<'a>(node: &'a Value, key: &str) -> Option<&'a Value> {
    node.get(key).filter(|v| is_truthy(v))
}

pub(crate) fn str_field(node: &Value, key: &str) -> Option<String> {
    present(node, key)
        .and_then(|v| v.as_str())
        .map(String::from)
}

pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// `image_versions2.candidates[0].url`
pub(crate) fn first_image_candidate(node: &Value) -> Option<String> {
    node.get("image_versions2")
        .and_then(|i| i.get("candidates"))
        .and_then(|c| c.as_array())
        .and_then(|arr| arr.first())
        .and_then(|img| str_field(img, "url"))
}

/// `video_versions[0].url`
pub(crate) fn first_video_version(node: &Value) -> Option<String> {
    node.get("video_versions")
        .and_then(|v| v.as_array())
        .and_then(|arr| arr.first())
        .and_then(|best| str_field(best, "url"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!(0)));
        assert!(is_truthy(&json!("x")));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({})));
    }

    #[test]
    fn test_candidate_helpers() {
        let node = json!({
            "video_versions": [{"url": "https://cdn/v.mp4"}, {"url": "https://cdn/low.mp4"}],
            "image_versions2": {"candidates": [{"url": "https://cdn/t.jpg"}]}
        });
        assert_eq!(first_video_version(&node).as_deref(), Some("https://cdn/v.mp4"));
        assert_eq!(first_image_candidate(&node).as_deref(), Some("https://cdn/t.jpg"));
        assert!(first_video_version(&json!({"video_versions": []})).is_none());
    }
}
