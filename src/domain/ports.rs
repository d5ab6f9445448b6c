use crate::domain::model::MediaCandidate;
use crate::domain::shortcode::ParsedUrl;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn bind_address(&self) -> &str;
    fn instagram_base(&self) -> &str;
    fn relay_base(&self) -> &str;
    fn request_timeout(&self) -> Duration;
    fn mobile_user_agent(&self) -> &str;
    fn desktop_user_agent(&self) -> &str;
    fn extraction_methods(&self) -> &[String];
    fn downloader_bases(&self) -> (&str, &str);
    fn allowed_host_suffixes(&self) -> &[String];
    fn proxy_requires_https(&self) -> bool;
}

/// 一種取得媒體直連網址的策略
///
/// `Ok(None)` means the method ran but found nothing usable; `Err` means the
/// probe itself broke. The chain treats both the same way and moves on.
#[async_trait]
pub trait ExtractionMethod: Send + Sync {
    fn name(&self) -> &'static str;
    async fn extract(&self, target: &ParsedUrl) -> Result<Option<MediaCandidate>>;
}
