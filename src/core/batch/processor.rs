//! Batch processor that marks every stored item as processed
//!
//! One run is a scatter-gather: snapshot the ids, dispatch one unit of work
//! per id onto the worker pool, then join every dispatched unit before the
//! report is built. Units are spawned tasks, so dropping the `process_all`
//! future stops further dispatch but lets dispatched units finish.

use super::pool::WorkerPool;
use super::types::{BatchReport, ItemFailure, ResultCollector, UnitErrorKind, UnitOutcome};
use crate::config::BatchConfig;
use crate::core::models::{Item, ItemId};
use crate::storage::ItemStore;
use crate::utils::error::{Result, ServiceError};
use futures::FutureExt;
use futures::future::join_all;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, info, warn};

/// Concurrently transitions items to `PROCESSED`
pub struct BatchProcessor {
    store: Arc<dyn ItemStore>,
    pool: WorkerPool,
    config: BatchConfig,
}

impl BatchProcessor {
    /// Create a processor running on an existing worker pool
    pub fn new(store: Arc<dyn ItemStore>, pool: WorkerPool, config: BatchConfig) -> Self {
        Self {
            store,
            pool,
            config,
        }
    }

    /// Create a processor with its own pool sized from `config`
    pub fn with_config(store: Arc<dyn ItemStore>, config: BatchConfig) -> Self {
        let pool = WorkerPool::new(config.concurrency);
        Self::new(store, pool, config)
    }

    pub fn pool(&self) -> &WorkerPool {
        &self.pool
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Process every item the store knows about right now.
    ///
    /// Fails only when the run cannot start: the pool is shut down or the id
    /// snapshot cannot be taken. Per-item failures are reported in the
    /// returned [`BatchReport`].
    pub async fn process_all(&self) -> Result<BatchReport> {
        if self.pool.is_closed() {
            return Err(ServiceError::unavailable(
                "Batch processor is shutting down",
            ));
        }

        let ids = self
            .store
            .list_ids()
            .await
            .map_err(|e| ServiceError::batch(format!("Failed to snapshot item ids: {}", e)))?;

        Ok(self.process_ids(ids).await)
    }

    /// Process the given ids. Ids missing from the store are skipped.
    pub async fn process_ids(&self, ids: Vec<ItemId>) -> BatchReport {
        let start = Instant::now();
        let total = ids.len();
        info!(total, workers = self.pool.size(), "Starting batch run");

        let collector = ResultCollector::new();
        let mut dispatched: Vec<(ItemId, JoinHandle<UnitOutcome>)> = Vec::with_capacity(total);
        let mut failures: Vec<ItemFailure> = Vec::new();

        let mut pending = ids.into_iter();
        for id in pending.by_ref() {
            let permit = match self.pool.acquire().await {
                Ok(permit) => permit,
                Err(closed) => {
                    failures.push(ItemFailure::interrupted(id, closed.to_string()));
                    break;
                }
            };

            let store = Arc::clone(&self.store);
            let config = self.config.clone();
            let collector = collector.clone();
            let handle = tokio::spawn(async move {
                let unit = AssertUnwindSafe(run_unit(store.as_ref(), id, &config, &collector));
                let outcome = match unit.catch_unwind().await {
                    Ok(outcome) => outcome,
                    Err(payload) => {
                        let failure = ItemFailure::new(
                            id,
                            UnitErrorKind::Panicked(panic_message(payload)),
                            1,
                        );
                        log_failure(&failure);
                        UnitOutcome::Failed(failure)
                    }
                };
                drop(permit);
                outcome
            });
            dispatched.push((id, handle));
        }

        // pool closed mid-run: nothing left will ever start
        failures.extend(
            pending.map(|id| ItemFailure::interrupted(id, "worker pool is shut down")),
        );
        // never-started units have no task of their own to log from
        failures.iter().for_each(log_failure);

        let outcomes = join_all(
            dispatched
                .into_iter()
                .map(|(id, handle)| async move { (id, handle.await) }),
        )
        .await;

        let mut skipped = Vec::new();
        let mut processed_count = 0usize;
        for (id, joined) in outcomes {
            let outcome = joined.unwrap_or_else(|e| {
                let failure = join_failure(id, e);
                log_failure(&failure);
                UnitOutcome::Failed(failure)
            });
            match outcome {
                UnitOutcome::Processed(_) => processed_count += 1,
                UnitOutcome::Skipped(id) => skipped.push(id),
                UnitOutcome::Failed(failure) => failures.push(failure),
            }
        }

        let processed = collector.into_items();
        debug_assert_eq!(processed.len(), processed_count);

        let report = BatchReport::new(total, processed, skipped, failures, start.elapsed());
        info!(
            total = report.total,
            processed = report.processed.len(),
            skipped = report.skipped.len(),
            failed = report.failures.len(),
            duration_ms = report.duration_ms,
            "Batch run finished"
        );
        report
    }

    /// Stop accepting work and wait for in-flight units
    pub async fn shutdown(&self) {
        self.pool.shutdown().await;
    }
}

/// Fetch, mark, save and record one item, retrying store failures
async fn run_unit(
    store: &dyn ItemStore,
    id: ItemId,
    config: &BatchConfig,
    collector: &ResultCollector,
) -> UnitOutcome {
    if let Some(delay) = config.unit_delay() {
        tokio::time::sleep(delay).await;
    }

    let mut attempts = 0u32;
    loop {
        attempts += 1;
        match mark_processed(store, id).await {
            Ok(Some(item)) => {
                collector.push(item.clone());
                return UnitOutcome::Processed(item);
            }
            Ok(None) => {
                debug!(item_id = id, "Item vanished before processing, skipping");
                return UnitOutcome::Skipped(id);
            }
            Err(e) if attempts <= config.max_retries => {
                debug!(item_id = id, attempts, "Retrying item after error: {}", e);
                tokio::time::sleep(config.retry_delay()).await;
            }
            Err(e) => {
                let failure =
                    ItemFailure::new(id, UnitErrorKind::Persistence(e.to_string()), attempts);
                log_failure(&failure);
                return UnitOutcome::Failed(failure);
            }
        }
    }
}

async fn mark_processed(store: &dyn ItemStore, id: ItemId) -> Result<Option<Item>> {
    let Some(mut item) = store.find_by_id(id).await? else {
        return Ok(None);
    };
    item.mark_processed();
    store.save(item).await.map(Some)
}

/// Logged where the failure happens so it survives a dropped caller
fn log_failure(failure: &ItemFailure) {
    warn!(
        item_id = failure.id,
        attempts = failure.attempts,
        "Failed to process item: {}",
        failure.error
    );
}

fn join_failure(id: ItemId, error: JoinError) -> ItemFailure {
    let kind = if error.is_panic() {
        UnitErrorKind::Panicked(panic_message(error.into_panic()))
    } else {
        UnitErrorKind::Interrupted("unit task was cancelled".to_string())
    };
    ItemFailure::new(id, kind, 1)
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
