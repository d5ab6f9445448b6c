use crate::core::methods::{
    EmbedPageMethod, ExternalServiceMethod, MediaInfoMethod, PublicApiMethod,
};
use crate::domain::model::MediaCandidate;
use crate::domain::ports::{ConfigProvider, ExtractionMethod};
use crate::domain::shortcode::ParsedUrl;
use crate::utils::error::{FetchError, Result};
use reqwest::Client;
use std::time::Instant;

/// 成功的擷取結果與產生它的方法名稱
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainOutcome {
    pub method: &'static str,
    pub candidate: MediaCandidate,
}

/// 單一方法的診斷結果（給 probe 工具用）
#[derive(Debug)]
pub struct MethodReport {
    pub method: &'static str,
    pub result: Result<Option<MediaCandidate>>,
    pub elapsed_ms: u128,
}

/// Ordered fallback chain of extraction methods.
pub struct ExtractionChain {
    methods: Vec<Box<dyn ExtractionMethod>>,
}

impl ExtractionChain {
    pub fn new() -> Self {
        Self {
            methods: Vec::new(),
        }
    }

    pub fn with_method(mut self, method: Box<dyn ExtractionMethod>) -> Self {
        self.methods.push(method);
        self
    }

    /// 依設定的順序建立方法鏈
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C, client: Client) -> Result<Self> {
        let mut chain = Self::new();

        for name in config.extraction_methods() {
            let method: Box<dyn ExtractionMethod> = match name.as_str() {
                "media_info" => Box::new(MediaInfoMethod::new(
                    client.clone(),
                    config.instagram_base(),
                    config.mobile_user_agent(),
                )),
                "public_api" => Box::new(PublicApiMethod::new(
                    client.clone(),
                    config.instagram_base(),
                    config.mobile_user_agent(),
                )),
                "embed_page" => Box::new(EmbedPageMethod::new(
                    client.clone(),
                    config.instagram_base(),
                    config.desktop_user_agent(),
                )),
                "external_service" => {
                    Box::new(ExternalServiceMethod::new(client.clone(), config.relay_base()))
                }
                other => {
                    return Err(FetchError::InvalidConfigValueError {
                        field: "extraction.methods".to_string(),
                        value: other.to_string(),
                        reason: "Unknown extraction method".to_string(),
                    })
                }
            };
            chain = chain.with_method(method);
        }

        if chain.methods.is_empty() {
            return Err(FetchError::MissingConfigError {
                field: "extraction.methods".to_string(),
            });
        }

        Ok(chain)
    }

    pub fn method_names(&self) -> Vec<&'static str> {
        self.methods.iter().map(|m| m.name()).collect()
    }

    /// Runs the methods one after another and returns the first hit.
    pub async fn run(&self, target: &ParsedUrl) -> Option<ChainOutcome> {
        for method in &self.methods {
            let start = Instant::now();
            match method.extract(target).await {
                Ok(Some(candidate)) => {
                    tracing::info!(
                        "✅ {} resolved {} in {:?} (is_video={})",
                        method.name(),
                        target.shortcode,
                        start.elapsed(),
                        candidate.is_video
                    );
                    return Some(ChainOutcome {
                        method: method.name(),
                        candidate,
                    });
                }
                Ok(None) => {
                    tracing::debug!("{} found nothing for {}", method.name(), target.shortcode);
                }
                Err(e) => {
                    tracing::warn!("⚠️ {} failed for {}: {}", method.name(), target.shortcode, e);
                }
            }
        }

        tracing::info!("❌ All {} methods failed for {}", self.methods.len(), target.shortcode);
        None
    }

    /// 每個方法都跑一次，不在第一個成功時停止
    pub async fn run_each(&self, target: &ParsedUrl) -> Vec<MethodReport> {
        let mut reports = Vec::with_capacity(self.methods.len());
        for method in &self.methods {
            let start = Instant::now();
            let result = method.extract(target).await;
            reports.push(MethodReport {
                method: method.name(),
                result,
                elapsed_ms: start.elapsed().as_millis(),
            });
        }
        reports
    }
}

impl Default for ExtractionChain {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_http_client<C: ConfigProvider + ?Sized>(config: &C) -> Result<Client> {
    Client::builder()
        .timeout(config.request_timeout())
        .build()
        .map_err(FetchError::HttpError)
}
