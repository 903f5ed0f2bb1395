//! Batch processing of stored items
//!
//! This module provides the "process all items" operation: a bounded,
//! failure-reporting fan-out over the item store.

mod pool;
mod processor;
mod types;


pub use pool::{PoolClosed, WorkerPermit, WorkerPool};
pub use processor::BatchProcessor;
pub use types::{BatchReport, ItemFailure, ResultCollector, UnitErrorKind, UnitOutcome};
