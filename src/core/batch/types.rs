//! Batch processing types and data structures

use crate::core::models::{Item, ItemId};
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Why a single unit of work failed
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum UnitErrorKind {
    /// The store rejected the lookup or the save
    #[error("persistence failure: {0}")]
    Persistence(String),
    /// The unit never ran or its task was cancelled
    #[error("interrupted: {0}")]
    Interrupted(String),
    /// The unit task panicked
    #[error("panicked: {0}")]
    Panicked(String),
}

/// A failed unit, attributed to its item
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("item {id}: {error}")]
pub struct ItemFailure {
    pub id: ItemId,
    pub error: UnitErrorKind,
    /// Attempts made before giving up (0 when the unit never started)
    pub attempts: u32,
}

impl ItemFailure {
    pub fn new(id: ItemId, error: UnitErrorKind, attempts: u32) -> Self {
        Self {
            id,
            error,
            attempts,
        }
    }

    pub fn interrupted(id: ItemId, reason: impl Into<String>) -> Self {
        Self::new(id, UnitErrorKind::Interrupted(reason.into()), 0)
    }
}

/// Terminal state of one unit of work
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitOutcome {
    /// Status set and saved
    Processed(Item),
    /// Item vanished between the id snapshot and the fetch
    Skipped(ItemId),
    Failed(ItemFailure),
}

/// Append-only collection of processed items shared by the workers of one run
#[derive(Debug, Clone, Default)]
pub struct ResultCollector {
    items: Arc<Mutex<Vec<Item>>>,
}

impl ResultCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, item: Item) {
        self.items.lock().push(item);
    }

    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }

    /// Take the collected items in completion order
    pub fn into_items(self) -> Vec<Item> {
        match Arc::try_unwrap(self.items) {
            Ok(mutex) => mutex.into_inner(),
            Err(shared) => shared.lock().clone(),
        }
    }
}

/// Result of one batch run
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    /// Ids in the snapshot taken at the start of the run
    pub total: usize,
    /// Processed items, in completion order
    pub processed: Vec<Item>,
    /// Ids that disappeared before they could be processed
    pub skipped: Vec<ItemId>,
    pub failures: Vec<ItemFailure>,
    pub duration_ms: u64,
}

impl BatchReport {
    pub(crate) fn new(
        total: usize,
        processed: Vec<Item>,
        mut skipped: Vec<ItemId>,
        mut failures: Vec<ItemFailure>,
        duration: Duration,
    ) -> Self {
        skipped.sort_unstable();
        failures.sort_by_key(|failure| failure.id);
        Self {
            total,
            processed,
            skipped,
            failures,
            duration_ms: duration.as_millis() as u64,
        }
    }

    /// True when no unit failed
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failed_ids(&self) -> Vec<ItemId> {
        self.failures.iter().map(|failure| failure.id).collect()
    }

    pub fn processed_ids(&self) -> Vec<ItemId> {
        self.processed.iter().filter_map(|item| item.id).collect()
    }
}
