pub mod api;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;
pub mod web;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use api::{router, AppState};
pub use config::ServiceConfig;
pub use crate::core::chain::{ChainOutcome, ExtractionChain};
pub use utils::error::{FetchError, Result};
