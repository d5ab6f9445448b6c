pub mod toml_config;

pub use toml_config::ServiceConfig;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::Validate;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "reel-fetch")]
#[command(about = "Resolve Instagram post and reel links into downloadable media")]
pub struct CliConfig {
    #[arg(long, env = "REEL_FETCH_BIND", help = "Address to listen on (overrides the config file)")]
    pub bind: Option<String>,

    #[arg(long, short, env = "REEL_FETCH_CONFIG", help = "Path to a TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 合併設定檔與命令列參數，並驗證結果
    pub fn load_service_config(&self) -> Result<ServiceConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::info!("📄 Loading configuration from {}", path.display());
                ServiceConfig::from_file(path)?
            }
            None => ServiceConfig::default(),
        };

        if let Some(bind) = &self.bind {
            config.server.bind = bind.clone();
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use crate::domain::ports::ConfigProvider;

    #[test]
    fn test_cli_bind_overrides_default() {
        let cli = CliConfig::parse_from(["reel-fetch", "--bind", "127.0.0.1:4000", "--verbose"]);
        assert!(cli.verbose);

        let config = cli.load_service_config().unwrap();
        assert_eq!(config.bind_address(), "127.0.0.1:4000");
    }

    #[test]
    fn test_cli_rejects_bad_bind() {
        let cli = CliConfig::parse_from(["reel-fetch", "--bind", "nowhere"]);
        assert!(cli.load_service_config().is_err());
    }
}
