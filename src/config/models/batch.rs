//! Batch processing configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Largest accepted worker pool size
pub const MAX_BATCH_CONCURRENCY: usize = 10_000;

/// Batch processor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Size of the worker pool shared by all batch runs
    #[serde(default = "default_batch_concurrency")]
    pub concurrency: usize,
    /// Extra attempts for a unit whose store call failed (0 = attempt once)
    #[serde(default)]
    pub max_retries: u32,
    /// Delay between attempts in milliseconds
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
    /// Simulated work per unit in milliseconds
    #[serde(default)]
    pub unit_delay_ms: u64,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            concurrency: default_batch_concurrency(),
            max_retries: 0,
            retry_delay_ms: default_retry_delay_ms(),
            unit_delay_ms: 0,
        }
    }
}

impl BatchConfig {
    /// Create a new config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the worker pool size
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.clamp(1, MAX_BATCH_CONCURRENCY);
        self
    }

    /// Set max retries
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the delay between retries
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay_ms = delay.as_millis() as u64;
        self
    }

    /// Set the simulated per-unit work
    pub fn with_unit_delay(mut self, delay: Duration) -> Self {
        self.unit_delay_ms = delay.as_millis() as u64;
        self
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn unit_delay(&self) -> Option<Duration> {
        (self.unit_delay_ms > 0).then(|| Duration::from_millis(self.unit_delay_ms))
    }

    /// Validate batch configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.concurrency == 0 {
            return Err("Batch concurrency must be at least 1".to_string());
        }
        if self.concurrency > MAX_BATCH_CONCURRENCY {
            return Err(format!(
                "Batch concurrency must be at most {}",
                MAX_BATCH_CONCURRENCY
            ));
        }
        Ok(())
    }
}
