//! Configuration loader with layered sources.

use crate::CacheConfig;
use config::{Config, ConfigError, Environment, File};
use fable_core::FableError;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Configuration loader with runtime refresh support.
#[derive(Clone)]
pub struct ConfigLoader {
    config: Arc<RwLock<CacheConfig>>,
    config_dir: String,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `config/default.toml` - Default values
    /// 2. `config/{environment}.toml` - Environment-specific overrides
    /// 3. `config/local.toml` - Local overrides (not committed)
    /// 4. Environment variables with `FABLE__` prefix
    pub fn new(config_dir: impl Into<String>) -> Result<Self, FableError> {
        let config_dir = config_dir.into();
        let config = Self::load_config(&config_dir)?;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            config_dir,
        })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, FableError> {
        Self::new("./config")
    }

    /// Returns the current configuration.
    pub async fn get(&self) -> CacheConfig {
        self.config.read().await.clone()
    }

    /// Reloads the configuration from disk.
    pub async fn reload(&self) -> Result<(), FableError> {
        let new_config = Self::load_config(&self.config_dir)?;
        let mut config = self.config.write().await;
        *config = new_config;
        info!("Configuration reloaded successfully");
        Ok(())
    }

    /// Loads configuration from the specified directory.
    fn load_config(config_dir: &str) -> Result<CacheConfig, FableError> {
        // Load .env file if present
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment =
            std::env::var("FABLE_ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        let default_path = format!("{}/default.toml", config_dir);
        if Path::new(&default_path).exists() {
            debug!("Loading default config from: {}", default_path);
            builder = builder.add_source(File::with_name(&default_path).required(false));
        }

        let env_path = format!("{}/{}.toml", config_dir, environment);
        if Path::new(&env_path).exists() {
            debug!("Loading environment config from: {}", env_path);
            builder = builder.add_source(File::with_name(&env_path).required(false));
        }

        let local_path = format!("{}/local.toml", config_dir);
        if Path::new(&local_path).exists() {
            debug!("Loading local config from: {}", local_path);
            builder = builder.add_source(File::with_name(&local_path).required(false));
        }

        builder = builder.add_source(
            Environment::with_prefix("FABLE")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_error_to_fable_error)?;

        let cache_config: CacheConfig = config
            .try_deserialize()
            .map_err(config_error_to_fable_error)?;

        Self::validate_config(&cache_config)?;

        Ok(cache_config)
    }

    /// Validates the configuration.
    fn validate_config(config: &CacheConfig) -> Result<(), FableError> {
        if config.enabled && config.redis.url.is_empty() {
            return Err(FableError::Configuration(
                "Redis URL is required when caching is enabled".to_string(),
            ));
        }

        if config.entry_ttl_secs == 0 {
            return Err(FableError::Configuration(
                "Entry TTL must be at least one second".to_string(),
            ));
        }

        Ok(())
    }
}

fn config_error_to_fable_error(err: ConfigError) -> FableError {
    FableError::Configuration(err.to_string())
}
