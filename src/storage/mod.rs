//! Storage layer for the item service
//!
//! This module defines the `ItemStore` collaborator and its backends.

/// Database storage module
pub mod database;
/// In-memory storage module
pub mod memory;

use crate::config::{StorageBackend, StorageConfig};
use crate::core::models::{Item, ItemId};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

pub use memory::MemoryItemStore;

/// Persistence collaborator for items
///
/// Implementations must be safe to call concurrently; the batch processor
/// issues `find_by_id` and `save` from many workers at once.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Ids of every stored item, ascending
    async fn list_ids(&self) -> Result<Vec<ItemId>>;

    /// Every stored item, ascending by id
    async fn find_all(&self) -> Result<Vec<Item>>;

    async fn find_by_id(&self, id: ItemId) -> Result<Option<Item>>;

    /// Insert or replace. Items without an id get the next free one.
    async fn save(&self, item: Item) -> Result<Item>;

    /// Delete an item. Deleting a missing id is not an error.
    async fn delete_by_id(&self, id: ItemId) -> Result<()>;

    /// Backend liveness check
    async fn health_check(&self) -> Result<()>;
}

/// Main storage layer that owns the configured item store
#[derive(Clone)]
pub struct StorageLayer {
    items: Arc<dyn ItemStore>,
    backend: StorageBackend,
}

impl StorageLayer {
    /// Create a new storage layer
    pub async fn new(config: &StorageConfig) -> Result<Self> {
        info!("Initializing storage layer ({})", config.backend);

        let items: Arc<dyn ItemStore> = match config.backend {
            StorageBackend::Memory => Arc::new(MemoryItemStore::new()),
            StorageBackend::Database => {
                let database = database::Database::new(&config.database).await?;
                database.migrate().await?;
                Arc::new(database)
            }
        };

        info!("Storage layer initialized successfully");
        Ok(Self {
            items,
            backend: config.backend,
        })
    }

    /// Wrap an already constructed store
    pub fn from_store(items: Arc<dyn ItemStore>, backend: StorageBackend) -> Self {
        Self { items, backend }
    }

    /// Shared handle to the item store
    pub fn items(&self) -> Arc<dyn ItemStore> {
        Arc::clone(&self.items)
    }

    pub fn backend(&self) -> StorageBackend {
        self.backend
    }

    /// Health check for the item store
    pub async fn health_check(&self) -> bool {
        match self.items.health_check().await {
            Ok(()) => true,
            Err(e) => {
                warn!("Item store health check failed: {}", e);
                false
            }
        }
    }
}
