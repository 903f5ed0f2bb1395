//! SQLite item store tests

#[cfg(test)]
mod tests {
    use crate::common::TestDatabase;
    use crate::common::database::test_db_config;
    use crate::common::fixtures::{ItemFactory, seed};
    use items_rs::config::{StorageBackend, StorageConfig};
    use items_rs::{BatchConfig, BatchProcessor, ItemStatus, ItemStore, StorageLayer};

    #[tokio::test]
    async fn test_database_health_check() {
        let db = TestDatabase::new().await;
        assert!(db.db().health_check().await.is_ok());
    }

    #[tokio::test]
    async fn test_save_assigns_ids_and_reads_back() {
        let db = TestDatabase::new().await;
        let store = db.db();

        let first = store.save(ItemFactory::create(1)).await.unwrap();
        let second = store.save(ItemFactory::create(2)).await.unwrap();
        assert_eq!(first.id, Some(1));
        assert_eq!(second.id, Some(2));

        let found = store.find_by_id(2).await.unwrap().unwrap();
        assert_eq!(found, second);
        assert_eq!(found.status, ItemStatus::New);
        assert_eq!(store.list_ids().await.unwrap(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_save_with_id_upserts() {
        let db = TestDatabase::new().await;
        let store = db.db();

        store.save(ItemFactory::create(1).with_id(10)).await.unwrap();
        let replaced = store
            .save(
                ItemFactory::create(2)
                    .with_id(10)
                    .with_status(ItemStatus::Processed),
            )
            .await
            .unwrap();

        assert_eq!(replaced.id, Some(10));
        let all = store.find_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "Item2");
        assert!(all[0].is_processed());
    }

    #[tokio::test]
    async fn test_generated_id_follows_explicit_id() {
        let db = TestDatabase::new().await;
        let store = db.db();

        store.save(ItemFactory::create(1).with_id(10)).await.unwrap();
        let generated = store.save(ItemFactory::create(2)).await.unwrap();

        assert_eq!(generated.id, Some(11));
        assert_eq!(store.list_ids().await.unwrap(), vec![10, 11]);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let db = TestDatabase::new().await;
        let store = db.db();
        seed(store, 2).await;

        store.delete_by_id(1).await.unwrap();
        store.delete_by_id(1).await.unwrap();
        store.delete_by_id(404).await.unwrap();

        assert!(store.find_by_id(1).await.unwrap().is_none());
        assert_eq!(store.list_ids().await.unwrap(), vec![2]);
    }

    #[tokio::test]
    async fn test_batch_over_sqlite() {
        let db = TestDatabase::new().await;
        seed(db.db(), 20).await;

        let processor =
            BatchProcessor::with_config(db.db_arc(), BatchConfig::new().with_concurrency(4));
        let report = processor.process_all().await.unwrap();

        assert_eq!(report.processed.len(), 20);
        assert!(report.is_complete());
        for item in db.db().find_all().await.unwrap() {
            assert_eq!(item.status, ItemStatus::Processed);
        }
    }

    #[tokio::test]
    async fn test_storage_layer_database_backend() {
        let config = StorageConfig {
            backend: StorageBackend::Database,
            database: test_db_config(),
        };
        let storage = StorageLayer::new(&config).await.unwrap();

        assert_eq!(storage.backend(), StorageBackend::Database);
        assert!(storage.health_check().await);

        let saved = storage.items().save(ItemFactory::create(1)).await.unwrap();
        assert_eq!(saved.id, Some(1));
    }
}
