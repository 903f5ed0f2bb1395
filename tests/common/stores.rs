//! Item stores with injectable faults

use async_trait::async_trait;
use items_rs::{Item, ItemId, ItemStore, MemoryItemStore, ServiceError};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Memory store that fails or slows down selected ids
#[derive(Default)]
pub struct FlakyStore {
    pub inner: MemoryItemStore,
    /// Ids whose save always fails
    pub failing_saves: HashSet<ItemId>,
    /// Ids deleted right before they are fetched
    pub vanishing: HashSet<ItemId>,
    /// Extra latency on every save
    pub save_delay: Option<Duration>,
    saves: AtomicUsize,
}

impl FlakyStore {
    pub fn with_items(items: Vec<Item>) -> Self {
        Self {
            inner: MemoryItemStore::with_items(items),
            ..Default::default()
        }
    }

    pub fn failing_on(mut self, id: ItemId) -> Self {
        self.failing_saves.insert(id);
        self
    }

    pub fn vanishing(mut self, id: ItemId) -> Self {
        self.vanishing.insert(id);
        self
    }

    pub fn slow_saves(mut self, delay: Duration) -> Self {
        self.save_delay = Some(delay);
        self
    }

    /// Successful saves so far
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ItemStore for FlakyStore {
    async fn list_ids(&self) -> items_rs::Result<Vec<ItemId>> {
        self.inner.list_ids().await
    }

    async fn find_all(&self) -> items_rs::Result<Vec<Item>> {
        self.inner.find_all().await
    }

    async fn find_by_id(&self, id: ItemId) -> items_rs::Result<Option<Item>> {
        if self.vanishing.contains(&id) {
            self.inner.delete_by_id(id).await?;
        }
        self.inner.find_by_id(id).await
    }

    async fn save(&self, item: Item) -> items_rs::Result<Item> {
        if let Some(delay) = self.save_delay {
            tokio::time::sleep(delay).await;
        }
        if item.id.is_some_and(|id| self.failing_saves.contains(&id)) {
            return Err(ServiceError::storage("simulated save failure"));
        }
        let saved = self.inner.save(item).await?;
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(saved)
    }

    async fn delete_by_id(&self, id: ItemId) -> items_rs::Result<()> {
        self.inner.delete_by_id(id).await
    }

    async fn health_check(&self) -> items_rs::Result<()> {
        Ok(())
    }
}
