pub mod handlers;

use crate::config::ServiceConfig;
use crate::core::chain::{build_http_client, ExtractionChain};
use crate::core::download::build_download_client;
use crate::utils::error::Result;
use crate::web::pages;
use axum::{
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use reqwest::Client;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServiceConfig>,
    pub chain: Arc<ExtractionChain>,
    /// 下載代理專用，不設總逾時並逐跳檢查轉址
    pub download_client: Client,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn from_config(config: ServiceConfig) -> Result<Self> {
        let client = build_http_client(&config)?;
        let chain = ExtractionChain::from_config(&config, client)?;
        let download_client = build_download_client(&config)?;

        Ok(Self {
            config: Arc::new(config),
            chain: Arc::new(chain),
            download_client,
            started_at: Utc::now(),
        })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/instagram", post(handlers::resolve_media))
        .route("/api/instagram/download", get(handlers::download_media))
        .route("/api/links", get(handlers::downloader_links))
        .route("/health", get(handlers::health_check))
        .merge(pages::routes())
        .fallback(pages::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
