//! Bounded worker pool shared by batch runs
//!
//! The pool is a semaphore of `size` permits. A unit of work is only spawned
//! once its dispatcher holds a permit, and the permit travels with the task,
//! so at most `size` units run at any time across every concurrent batch.

use crate::config::MAX_BATCH_CONCURRENCY;
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tracing::{debug, info};

/// Returned when acquiring from a pool that has been shut down
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("worker pool is shut down")]
pub struct PoolClosed;

/// Permit held by one running unit of work
#[derive(Debug)]
pub struct WorkerPermit {
    _permit: OwnedSemaphorePermit,
}

/// Fixed-size worker pool with an explicit lifecycle
#[derive(Debug, Clone)]
pub struct WorkerPool {
    semaphore: Arc<Semaphore>,
    size: usize,
}

impl WorkerPool {
    /// Create a pool with `size` workers, clamped to `1..=MAX_BATCH_CONCURRENCY`
    pub fn new(size: usize) -> Self {
        let size = size.clamp(1, MAX_BATCH_CONCURRENCY);
        debug!("Creating worker pool with {} workers", size);
        Self {
            semaphore: Arc::new(Semaphore::new(size)),
            size,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of workers currently running a unit
    pub fn in_flight(&self) -> usize {
        self.size.saturating_sub(self.semaphore.available_permits())
    }

    pub fn is_closed(&self) -> bool {
        self.semaphore.is_closed()
    }

    /// Wait for a free worker
    pub async fn acquire(&self) -> Result<WorkerPermit, PoolClosed> {
        Arc::clone(&self.semaphore)
            .acquire_owned()
            .await
            .map(|permit| WorkerPermit { _permit: permit })
            .map_err(|_| PoolClosed)
    }

    /// Wait for every in-flight unit to finish, then close the pool.
    ///
    /// The semaphore is fair, so acquirers queued after this call are not
    /// served before it and fail with [`PoolClosed`] once the pool closes.
    pub async fn shutdown(&self) {
        if self.is_closed() {
            return;
        }

        info!(in_flight = self.in_flight(), "Shutting down worker pool");
        let Ok(permits) = u32::try_from(self.size) else {
            // unreachable while `new` clamps the size
            self.semaphore.close();
            return;
        };
        match self.semaphore.acquire_many(permits).await {
            Ok(permits) => {
                self.semaphore.close();
                drop(permits);
            }
            Err(_) => {
                // closed concurrently by another shutdown call
            }
        }
        info!("Worker pool shut down");
    }
}

impl Default for WorkerPool {
    fn default() -> Self {
        Self::new(crate::config::default_batch_concurrency())
    }
}
