//! # items-rs
//!
//! A CRUD service for items with a concurrent batch processor that marks
//! every stored item as processed.
//!
//! ## Features
//!
//! - **REST API**: create, read, update and delete items over actix-web
//! - **Batch processing**: bounded fan-out over a worker pool with per-item
//!   failure reporting and no lost work
//! - **Pluggable storage**: in-memory or SQL (SeaORM) item stores
//!
//! ## Library use
//!
//! ```rust,no_run
//! use items_rs::{BatchProcessor, BatchConfig, MemoryItemStore};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(MemoryItemStore::new());
//!     let processor = BatchProcessor::with_config(store, BatchConfig::default());
//!
//!     let report = processor.process_all().await?;
//!     println!("processed {} of {}", report.processed.len(), report.total);
//!     Ok(())
//! }
//! ```
//!
//! ## Server mode
//!
//! ```rust,no_run
//! use items_rs::{Config, ItemService};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/items.yaml").await?;
//!     let service = ItemService::new(config).await?;
//!     service.run().await?;
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod server;
pub mod storage;
pub mod utils;

// Re-export main types
pub use config::{BatchConfig, Config};
pub use core::batch::{BatchProcessor, BatchReport, ItemFailure, UnitErrorKind, WorkerPool};
pub use core::models::{Item, ItemId, ItemPayload, ItemStatus};
pub use storage::{ItemStore, MemoryItemStore, StorageLayer};
pub use utils::error::{Result, ServiceError};

use tracing::info;

/// The item service: HTTP server plus batch processor
pub struct ItemService {
    config: Config,
    server: server::HttpServer,
}

impl ItemService {
    /// Create a new service instance
    pub async fn new(config: Config) -> Result<Self> {
        info!("Creating item service");
        let server = server::ServerBuilder::new()
            .with_config(config.clone())
            .build()
            .await?;

        Ok(Self { config, server })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Serve until the HTTP server stops
    pub async fn run(self) -> Result<()> {
        let build = build_info();
        info!(
            version = build.version,
            git_hash = build.git_hash,
            storage = %self.config.storage.backend,
            batch_workers = self.config.batch.concurrency,
            "Starting item service"
        );
        server::builder::log_endpoints(&self.config.server.address());
        self.server.start().await
    }
}

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Build information
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Version number
    pub version: &'static str,
    /// Seconds since the epoch at build time
    pub build_time: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            build_time: option_env!("BUILD_TIME").unwrap_or("unknown"),
            git_hash: option_env!("GIT_HASH").unwrap_or("unknown"),
        }
    }
}

/// Build
pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}
