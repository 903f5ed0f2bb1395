//! In-memory item store

use super::ItemStore;
use crate::core::models::{Item, ItemId};
use crate::utils::error::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use tracing::debug;

/// Process-local item store backed by a concurrent map
#[derive(Debug)]
pub struct MemoryItemStore {
    items: DashMap<ItemId, Item>,
    next_id: AtomicI64,
}

impl MemoryItemStore {
    pub fn new() -> Self {
        Self {
            items: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    /// Create a store pre-populated with `items`
    pub fn with_items(items: impl IntoIterator<Item = Item>) -> Self {
        let store = Self::new();
        for item in items {
            store.insert(item);
        }
        store
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn insert(&self, mut item: Item) -> Item {
        let id = match item.id {
            Some(id) => {
                // keep generated ids clear of explicitly chosen ones
                self.next_id.fetch_max(id + 1, Ordering::SeqCst);
                id
            }
            None => self.next_id.fetch_add(1, Ordering::SeqCst),
        };
        item.id = Some(id);
        self.items.insert(id, item.clone());
        item
    }
}

impl Default for MemoryItemStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ItemStore for MemoryItemStore {
    async fn list_ids(&self) -> Result<Vec<ItemId>> {
        let mut ids: Vec<ItemId> = self.items.iter().map(|entry| *entry.key()).collect();
        ids.sort_unstable();
        Ok(ids)
    }

    async fn find_all(&self) -> Result<Vec<Item>> {
        let mut items: Vec<Item> = self.items.iter().map(|entry| entry.value().clone()).collect();
        items.sort_by_key(|item| item.id);
        Ok(items)
    }

    async fn find_by_id(&self, id: ItemId) -> Result<Option<Item>> {
        Ok(self.items.get(&id).map(|entry| entry.value().clone()))
    }

    async fn save(&self, item: Item) -> Result<Item> {
        let saved = self.insert(item);
        debug!(item_id = ?saved.id, "Saved item");
        Ok(saved)
    }

    async fn delete_by_id(&self, id: ItemId) -> Result<()> {
        self.items.remove(&id);
        Ok(())
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}
