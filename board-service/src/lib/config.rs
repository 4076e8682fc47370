use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    #[serde(default)]
    pub token: TokenConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

/// Which token strategy the process runs with. Never mixed: every token
/// issued and verified by a process goes through the one configured kind.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenStrategyKind {
    Signed,
    Opaque,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TokenConfig {
    #[serde(default = "TokenConfig::default_strategy")]
    pub strategy: TokenStrategyKind,

    /// HS256 signing secret. Required, and at least 32 bytes, when the
    /// signed strategy is active; unused by the opaque strategy.
    pub secret: Option<String>,

    #[serde(default = "TokenConfig::default_validity_hours")]
    pub validity_hours: i64,
}

impl TokenConfig {
    fn default_strategy() -> TokenStrategyKind {
        TokenStrategyKind::Signed
    }

    fn default_validity_hours() -> i64 {
        2
    }
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            strategy: TokenConfig::default_strategy(),
            secret: None,
            validity_hours: TokenConfig::default_validity_hours(),
        }
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, TOKEN__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: TOKEN__SECRET=... overrides token.secret
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        Ok(config)
    }
}
