use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("{message}")]
    BadRequest { message: String },

    #[error("{message}")]
    NotFound {
        message: String,
        suggestion: Option<String>,
    },

    #[error("Refusing to proxy {url}: {reason}")]
    ForbiddenTarget { url: String, reason: String },

    #[error("Upstream {service} returned {status}")]
    UpstreamError { service: String, status: u16 },

    #[error("Request processing failed: {message}")]
    ProcessingError { message: String },
}

pub type Result<T> = std::result::Result<T, FetchError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Client,
    Content,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

/// JSON 錯誤回應，與前端約定的格式 `{ error, suggestion? }`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl FetchError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        FetchError::BadRequest {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            FetchError::HttpError(_) | FetchError::UpstreamError { .. } => ErrorCategory::Network,
            FetchError::ConfigValidationError { .. }
            | FetchError::InvalidConfigValueError { .. }
            | FetchError::MissingConfigError { .. } => ErrorCategory::Configuration,
            FetchError::BadRequest { .. } | FetchError::ForbiddenTarget { .. } => {
                ErrorCategory::Client
            }
            FetchError::NotFound { .. } => ErrorCategory::Content,
            FetchError::IoError(_)
            | FetchError::SerializationError(_)
            | FetchError::ProcessingError { .. } => ErrorCategory::Internal,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Client | ErrorCategory::Content => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Internal => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            FetchError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            FetchError::NotFound { .. } => StatusCode::NOT_FOUND,
            FetchError::ForbiddenTarget { .. } => StatusCode::FORBIDDEN,
            FetchError::HttpError(_) | FetchError::UpstreamError { .. } => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 給使用者看的訊息，不洩漏內部細節
    pub fn user_friendly_message(&self) -> String {
        match self {
            FetchError::BadRequest { message } | FetchError::NotFound { message, .. } => {
                message.clone()
            }
            FetchError::ForbiddenTarget { .. } => {
                "Only Instagram media URLs can be downloaded".to_string()
            }
            FetchError::HttpError(_) | FetchError::UpstreamError { .. } => {
                "The media server did not respond. Please try again.".to_string()
            }
            FetchError::ConfigValidationError { field, message } => {
                format!("Configuration problem in '{}': {}", field, message)
            }
            FetchError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
            FetchError::MissingConfigError { field } => {
                format!("Configuration value '{}' is required", field)
            }
            FetchError::IoError(_)
            | FetchError::SerializationError(_)
            | FetchError::ProcessingError { .. } => {
                "Server error while processing request. Please try again.".to_string()
            }
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            FetchError::NotFound {
                suggestion: Some(suggestion),
                ..
            } => suggestion.clone(),
            FetchError::NotFound { .. } => {
                "Try a different reel or make sure the account is public.".to_string()
            }
            FetchError::BadRequest { .. } => {
                "Paste a link to an Instagram post, reel or IGTV video.".to_string()
            }
            FetchError::ForbiddenTarget { .. } => {
                "Use the media URL returned by /api/instagram.".to_string()
            }
            FetchError::HttpError(_) | FetchError::UpstreamError { .. } => {
                "Check network connectivity and retry later.".to_string()
            }
            FetchError::ConfigValidationError { .. }
            | FetchError::InvalidConfigValueError { .. }
            | FetchError::MissingConfigError { .. } => {
                "Fix the configuration file or command line arguments and restart.".to_string()
            }
            FetchError::IoError(_)
            | FetchError::SerializationError(_)
            | FetchError::ProcessingError { .. } => {
                "Retry the request; if it keeps failing, check the server logs.".to_string()
            }
        }
    }

    pub fn to_body(&self) -> ErrorBody {
        let suggestion = match self {
            FetchError::NotFound { suggestion, .. } => suggestion.clone(),
            _ => None,
        };
        ErrorBody {
            error: self.user_friendly_message(),
            suggestion,
        }
    }
}

impl IntoResponse for FetchError {
    fn into_response(self) -> Response {
        match self.severity() {
            ErrorSeverity::High | ErrorSeverity::Critical => {
                tracing::error!("❌ Request failed: {} ({:?})", self, self.category());
            }
            ErrorSeverity::Medium => tracing::warn!("⚠️ Upstream problem: {}", self),
            ErrorSeverity::Low => tracing::debug!("Request rejected: {}", self),
        }

        (self.status_code(), Json(self.to_body())).into_response()
    }
}
