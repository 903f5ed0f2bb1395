//! Configuration management for the item service
//!
//! This module handles loading, environment overrides and validation of the service configuration.

pub mod args;
pub mod models;

pub use args::ServerArgs;
pub use models::*;

use crate::utils::error::{Result, ServiceError};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

/// Default location of the configuration file
pub const DEFAULT_CONFIG_PATH: &str = "config/items.yaml";

/// Main configuration struct for the service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Item store configuration
    #[serde(default)]
    pub storage: StorageConfig,
    /// Batch processor configuration
    #[serde(default)]
    pub batch: BatchConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ServiceError::Config(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_yaml(&content)?;
        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Parse and validate configuration from a YAML document
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| ServiceError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables on top of the defaults
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let mut config = Self::default();
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Override fields from environment variables
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(host) = env::var("ITEMS_HOST") {
            self.server.host = host;
        }
        if let Some(port) = parse_env("ITEMS_PORT")? {
            self.server.port = port;
        }
        if let Some(workers) = parse_env("ITEMS_WORKERS")? {
            self.server.workers = Some(workers);
        }
        if let Some(backend) = parse_env::<StorageBackend>("ITEMS_STORAGE_BACKEND")? {
            self.storage.backend = backend;
        }
        if let Ok(url) = env::var("DATABASE_URL") {
            self.storage.database.url = url;
        }
        if let Some(concurrency) = parse_env("ITEMS_BATCH_CONCURRENCY")? {
            self.batch.concurrency = concurrency;
        }
        if let Some(retries) = parse_env("ITEMS_BATCH_MAX_RETRIES")? {
            self.batch.max_retries = retries;
        }
        if let Ok(format) = env::var("ITEMS_LOG_FORMAT") {
            self.logging.format = match format.to_ascii_lowercase().as_str() {
                "json" => LogFormat::Json,
                "pretty" => LogFormat::Pretty,
                other => {
                    return Err(ServiceError::Config(format!(
                        "Invalid ITEMS_LOG_FORMAT: {}",
                        other
                    )));
                }
            };
        }
        Ok(())
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.server
    }

    /// Get storage configuration
    pub fn storage(&self) -> &StorageConfig {
        &self.storage
    }

    /// Get batch configuration
    pub fn batch(&self) -> &BatchConfig {
        &self.batch
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.server
            .validate()
            .map_err(|e| ServiceError::Config(format!("Server config error: {}", e)))?;
        self.storage
            .validate()
            .map_err(|e| ServiceError::Config(format!("Storage config error: {}", e)))?;
        self.batch
            .validate()
            .map_err(|e| ServiceError::Config(format!("Batch config error: {}", e)))?;
        self.logging
            .validate()
            .map_err(|e| ServiceError::Config(format!("Logging config error: {}", e)))?;

        Ok(())
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| ServiceError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}

fn parse_env<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map(Some)
            .map_err(|e| ServiceError::Config(format!("Invalid {}: {}", key, e))),
        Err(_) => Ok(None),
    }
}
