//! Batch processor integration tests

#[cfg(test)]
mod tests {
    use crate::common::fixtures::{ItemFactory, seed};
    use crate::common::stores::FlakyStore;
    use items_rs::{
        BatchConfig, BatchProcessor, ItemStore, MemoryItemStore, UnitErrorKind, WorkerPool,
    };
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    #[tokio::test]
    async fn test_all_items_processed() {
        let store = Arc::new(MemoryItemStore::new());
        seed(store.as_ref(), 40).await;

        let processor = BatchProcessor::with_config(store.clone(), BatchConfig::default());
        let report = processor.process_all().await.unwrap();

        assert_eq!(report.total, 40);
        assert_eq!(report.processed.len(), 40);
        assert!(report.is_complete());
        assert!(store.find_all().await.unwrap().iter().all(|item| item.is_processed()));
    }

    #[tokio::test]
    async fn test_failure_does_not_lose_completed_work() {
        let store = Arc::new(FlakyStore::with_items(ItemFactory::many(10)).failing_on(5));
        let processor = BatchProcessor::with_config(store.clone(), BatchConfig::default());

        let report = processor.process_all().await.unwrap();

        assert_eq!(report.failed_ids(), vec![5]);
        assert!(matches!(report.failures[0].error, UnitErrorKind::Persistence(_)));
        assert_eq!(report.processed.len(), 9);
        assert_eq!(store.save_count(), 9);
    }

    #[tokio::test]
    async fn test_report_waits_for_slow_units() {
        let store = Arc::new(
            FlakyStore::with_items(ItemFactory::many(4)).slow_saves(Duration::from_millis(100)),
        );
        let config = BatchConfig::new().with_concurrency(2);
        let processor = BatchProcessor::with_config(store.clone(), config);

        let start = Instant::now();
        let report = processor.process_all().await.unwrap();

        // two waves of two units each
        assert!(start.elapsed() >= Duration::from_millis(200));
        assert_eq!(report.processed.len(), 4);
        assert_eq!(store.save_count(), 4);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_shared_pool_across_processors() {
        let store = Arc::new(MemoryItemStore::new());
        seed(store.as_ref(), 100).await;

        let pool = WorkerPool::new(5);
        let first = BatchProcessor::new(store.clone(), pool.clone(), BatchConfig::default());
        let second = BatchProcessor::new(store.clone(), pool.clone(), BatchConfig::default());

        let (left, right) = tokio::join!(
            first.process_ids((1..=50).collect()),
            second.process_ids((51..=100).collect()),
        );

        let left_ids: HashSet<_> = left.processed_ids().into_iter().collect();
        let right_ids: HashSet<_> = right.processed_ids().into_iter().collect();
        assert_eq!(left_ids.len(), 50);
        assert_eq!(right_ids.len(), 50);
        assert!(left_ids.is_disjoint(&right_ids));
        assert_eq!(pool.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_ids_added_after_snapshot_are_ignored() {
        let store = Arc::new(
            FlakyStore::with_items(ItemFactory::many(3)).slow_saves(Duration::from_millis(50)),
        );
        let processor = Arc::new(BatchProcessor::with_config(
            store.clone(),
            BatchConfig::new().with_concurrency(3),
        ));

        let run = {
            let processor = Arc::clone(&processor);
            tokio::spawn(async move { processor.process_all().await })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;
        let late = store.inner.save(ItemFactory::create(99)).await.unwrap();

        let report = run.await.unwrap().unwrap();
        assert_eq!(report.total, 3);
        assert!(!report.processed_ids().contains(&late.id.unwrap()));
        assert!(!store.find_by_id(late.id.unwrap()).await.unwrap().unwrap().is_processed());
    }

    #[tokio::test]
    async fn test_shutdown_then_run_is_rejected() {
        let store = Arc::new(MemoryItemStore::new());
        seed(store.as_ref(), 3).await;
        let processor = BatchProcessor::with_config(store, BatchConfig::default());

        processor.shutdown().await;
        assert!(processor.pool().is_closed());
        let err = crate::assert_err!(processor.process_all().await);
        assert!(err.to_string().contains("shutting down"));
    }
}
