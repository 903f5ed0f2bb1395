//! Application state shared across HTTP handlers

use crate::config::Config;
use crate::core::batch::{BatchProcessor, WorkerPool};
use crate::storage::{ItemStore, StorageLayer};
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// Every field is behind an `Arc`, so cloning the state per actix worker is
/// cheap and all workers share one store and one batch worker pool.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration (shared read-only)
    pub config: Arc<Config>,
    /// Storage layer
    pub storage: Arc<StorageLayer>,
    /// Batch processor running on the service's worker pool
    pub processor: Arc<BatchProcessor>,
}

impl AppState {
    /// Create the state, wiring the processor to the storage layer's store
    pub fn new(config: Config, storage: StorageLayer, pool: WorkerPool) -> Self {
        let processor = BatchProcessor::new(storage.items(), pool, config.batch.clone());
        Self {
            config: Arc::new(config),
            storage: Arc::new(storage),
            processor: Arc::new(processor),
        }
    }

    /// Get service configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Shared handle to the item store
    pub fn items(&self) -> Arc<dyn ItemStore> {
        self.storage.items()
    }
}
