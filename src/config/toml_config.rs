use crate::domain::ports::ConfigProvider;
use crate::utils::error::{FetchError, Result};
use crate::utils::validation::{self, Validate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BIND: &str = "0.0.0.0:3000";
pub const MOBILE_USER_AGENT: &str = "Instagram 275.0.0.27.98 Android (33/13; 420dpi; 1080x2400; samsung; SM-G991B; o1s; exynos2100; en_US; 458229237)";
pub const DESKTOP_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// 已知的擷取方法名稱，順序即預設執行順序
pub const KNOWN_METHODS: [&str; 4] = ["media_info", "public_api", "embed_page", "external_service"];

static ENV_VAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var regex"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub server: ServerSection,
    pub http: HttpSection,
    pub endpoints: EndpointsSection,
    pub extraction: ExtractionSection,
    pub downloaders: DownloadersSection,
    pub proxy: ProxySection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub bind: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSection {
    pub timeout_seconds: u64,
    pub mobile_user_agent: String,
    pub desktop_user_agent: String,
}

impl Default for HttpSection {
    fn default() -> Self {
        Self {
            timeout_seconds: 15,
            mobile_user_agent: MOBILE_USER_AGENT.to_string(),
            desktop_user_agent: DESKTOP_USER_AGENT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointsSection {
    pub instagram_base: String,
    pub relay_base: String,
}

impl Default for EndpointsSection {
    fn default() -> Self {
        Self {
            instagram_base: "https://www.instagram.com".to_string(),
            relay_base: "https://api.rapidsave.com".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionSection {
    pub methods: Vec<String>,
}

impl Default for ExtractionSection {
    fn default() -> Self {
        Self {
            methods: KNOWN_METHODS.iter().map(|m| m.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadersSection {
    pub primary: String,
    pub alternative: String,
}

impl Default for DownloadersSection {
    fn default() -> Self {
        Self {
            primary: "https://snapinsta.app/download".to_string(),
            alternative: "https://fastdl.app/en/".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySection {
    pub allowed_host_suffixes: Vec<String>,
    pub require_https: bool,
}

impl Default for ProxySection {
    fn default() -> Self {
        Self {
            allowed_host_suffixes: vec!["cdninstagram.com".to_string(), "fbcdn.net".to_string()],
            require_https: true,
        }
    }
}

impl ServiceConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(FetchError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| FetchError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${IG_BASE})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_RE
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_socket_addr("server.bind", &self.server.bind)?;
        validation::validate_positive_number("http.timeout_seconds", self.http.timeout_seconds, 1)?;
        validation::validate_non_empty_string("http.mobile_user_agent", &self.http.mobile_user_agent)?;
        validation::validate_non_empty_string(
            "http.desktop_user_agent",
            &self.http.desktop_user_agent,
        )?;
        validation::validate_url("endpoints.instagram_base", &self.endpoints.instagram_base)?;
        validation::validate_url("endpoints.relay_base", &self.endpoints.relay_base)?;
        validation::validate_one_of("extraction.methods", &self.extraction.methods, &KNOWN_METHODS)?;
        validation::validate_url("downloaders.primary", &self.downloaders.primary)?;
        validation::validate_url("downloaders.alternative", &self.downloaders.alternative)?;

        for suffix in &self.proxy.allowed_host_suffixes {
            validation::validate_non_empty_string("proxy.allowed_host_suffixes", suffix)?;
        }

        Ok(())
    }
}

impl ConfigProvider for ServiceConfig {
    fn bind_address(&self) -> &str {
        &self.server.bind
    }

    fn instagram_base(&self) -> &str {
        self.endpoints.instagram_base.trim_end_matches('/')
    }

    fn relay_base(&self) -> &str {
        self.endpoints.relay_base.trim_end_matches('/')
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_seconds)
    }

    fn mobile_user_agent(&self) -> &str {
        &self.http.mobile_user_agent
    }

    fn desktop_user_agent(&self) -> &str {
        &self.http.desktop_user_agent
    }

    fn extraction_methods(&self) -> &[String] {
        &self.extraction.methods
    }

    fn downloader_bases(&self) -> (&str, &str) {
        (&self.downloaders.primary, &self.downloaders.alternative)
    }

    fn allowed_host_suffixes(&self) -> &[String] {
        &self.proxy.allowed_host_suffixes
    }

    fn proxy_requires_https(&self) -> bool {
        self.proxy.require_https
    }
}

impl Validate for ServiceConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
