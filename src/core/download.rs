use crate::domain::ports::ConfigProvider;
use crate::utils::error::{FetchError, Result};
use reqwest::{redirect, Client};
use url::Url;

pub const DEFAULT_FILENAME: &str = "instagram_media";
const MAX_REDIRECTS: usize = 10;

/// 可轉送的媒體主機規則
#[derive(Debug, Clone)]
pub struct MediaHostPolicy {
    pub allowed_suffixes: Vec<String>,
    pub require_https: bool,
}

impl MediaHostPolicy {
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self {
            allowed_suffixes: config.allowed_host_suffixes().to_vec(),
            require_https: config.proxy_requires_https(),
        }
    }

    /// 只允許轉送 Instagram CDN 上的網址
    pub fn validate(&self, raw: &str) -> Result<Url> {
        let url =
            Url::parse(raw).map_err(|e| FetchError::bad_request(format!("Invalid media URL: {}", e)))?;

        let scheme_ok = match url.scheme() {
            "https" => true,
            "http" => !self.require_https,
            _ => false,
        };
        if !scheme_ok {
            return Err(FetchError::ForbiddenTarget {
                url: raw.to_string(),
                reason: format!("scheme '{}' is not proxied", url.scheme()),
            });
        }

        let host = url.host_str().unwrap_or_default().to_ascii_lowercase();
        let allowed = self.allowed_suffixes.iter().any(|suffix| {
            let suffix = suffix.trim_start_matches('.').to_ascii_lowercase();
            host == suffix || host.ends_with(&format!(".{}", suffix))
        });

        if !allowed {
            return Err(FetchError::ForbiddenTarget {
                url: raw.to_string(),
                reason: format!("host '{}' is not an allowed media host", host),
            });
        }

        Ok(url)
    }
}

/// Client for the download proxy.
///
/// No total timeout: a large file may take longer than `http.timeout_seconds`
/// to stream, so only connecting and each individual read are bounded.
/// Every redirect hop is checked against the same host policy.
pub fn build_download_client<C: ConfigProvider + ?Sized>(config: &C) -> Result<Client> {
    let policy = MediaHostPolicy::from_config(config);

    Client::builder()
        .connect_timeout(config.request_timeout())
        .read_timeout(config.request_timeout())
        .redirect(redirect::Policy::custom(move |attempt| {
            if attempt.previous().len() >= MAX_REDIRECTS {
                return attempt.error("too many redirects");
            }
            match policy.validate(attempt.url().as_str()) {
                Ok(_) => attempt.follow(),
                Err(e) => {
                    tracing::warn!("⚠️ Not following redirect: {}", e);
                    attempt.stop()
                }
            }
        }))
        .build()
        .map_err(FetchError::HttpError)
}

/// Keeps `[A-Za-z0-9._-]`, replaces everything else with `_`.
pub fn sanitize_filename(raw: Option<&str>) -> String {
    let cleaned: String = raw
        .unwrap_or_default()
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        DEFAULT_FILENAME.to_string()
    } else {
        cleaned.to_string()
    }
}

pub fn content_disposition(filename: &str) -> String {
    format!("attachment; filename=\"{}\"", filename)
}
