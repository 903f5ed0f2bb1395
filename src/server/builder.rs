//! Server builder and run_server function
//!
//! This module provides the ServerBuilder for easier server configuration
//! and the run_server function for automatic configuration loading.

use crate::config::{Config, DEFAULT_CONFIG_PATH};
use crate::server::server::HttpServer;
use crate::utils::error::{Result, ServiceError};
use tracing::info;

/// Server builder for easier configuration
pub struct ServerBuilder {
    config: Option<Config>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the HTTP server
    pub async fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| ServiceError::Config("Configuration is required".to_string()))?;

        config.validate()?;
        HttpServer::new(&config).await
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the server with automatic configuration loading
pub async fn run_server() -> Result<()> {
    info!("Loading configuration file: {}", DEFAULT_CONFIG_PATH);

    let mut config = match Config::from_file(DEFAULT_CONFIG_PATH).await {
        Ok(config) => config,
        Err(e) => {
            info!("Configuration file not loaded, using defaults: {}", e);
            Config::default()
        }
    };
    config.apply_env()?;

    let server = ServerBuilder::new().with_config(config).build().await?;
    log_endpoints(server.config().address().as_str());
    server.start().await
}

pub(crate) fn log_endpoints(address: &str) {
    info!("Server starting at: http://{}", address);
    info!("API Endpoints:");
    info!("   GET    /health");
    info!("   GET    /api/items");
    info!("   POST   /api/items");
    info!("   GET    /api/items/process");
    info!("   GET    /api/items/{{id}}");
    info!("   PUT    /api/items/{{id}}");
    info!("   DELETE /api/items/{{id}}");
}
