//! Command line arguments for the server binary

use super::{Config, DEFAULT_CONFIG_PATH, StorageBackend};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "items-server")]
#[command(about = "Item CRUD service with a concurrent batch processor")]
#[command(version)]
pub struct ServerArgs {
    /// Path to the YAML configuration file
    #[arg(short, long, env = "ITEMS_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Override the bind host
    #[arg(long)]
    pub host: Option<String>,

    /// Override the bind port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override the storage backend (memory, database)
    #[arg(long)]
    pub storage: Option<StorageBackend>,

    /// Override the batch worker pool size
    #[arg(long)]
    pub concurrency: Option<usize>,
}

impl ServerArgs {
    /// Apply command line overrides, which win over file and environment
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(storage) = self.storage {
            config.storage.backend = storage;
        }
        if let Some(concurrency) = self.concurrency {
            config.batch.concurrency = concurrency;
        }
    }
}
