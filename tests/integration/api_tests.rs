//! HTTP API tests against the full application

#[cfg(test)]
mod tests {
    use crate::common::fixtures::{ItemFactory, seed};
    use crate::common::stores::FlakyStore;
    use actix_web::http::StatusCode;
    use actix_web::{test, web};
    use items_rs::config::{Config, StorageBackend};
    use items_rs::server::routes::items::{FAILED_COUNT_HEADER, FAILED_IDS_HEADER};
    use items_rs::server::{AppState, HttpServer};
    use items_rs::storage::StorageLayer;
    use items_rs::{Item, ItemStatus, ItemStore, MemoryItemStore, WorkerPool};
    use std::sync::Arc;

    fn app_state(store: Arc<dyn ItemStore>) -> web::Data<AppState> {
        let storage = StorageLayer::from_store(store, StorageBackend::Memory);
        web::Data::new(AppState::new(Config::default(), storage, WorkerPool::new(10)))
    }

    #[actix_web::test]
    async fn test_item_lifecycle() {
        let store: Arc<dyn ItemStore> = Arc::new(MemoryItemStore::new());
        let app = test::init_service(HttpServer::create_app(app_state(store))).await;

        // create
        let req = test::TestRequest::post()
            .uri("/api/items")
            .set_json(ItemFactory::payload("Item1", "a@b.com"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: Item = test::read_body_json(resp).await;
        let id = created.id.expect("created item has an id");

        // read
        let req = test::TestRequest::get()
            .uri(&format!("/api/items/{}", id))
            .to_request();
        let fetched: Item = test::call_and_read_body_json(&app, req).await;
        assert_eq!(fetched, created);

        // update
        let req = test::TestRequest::put()
            .uri(&format!("/api/items/{}", id))
            .set_json(ItemFactory::payload("Renamed", "renamed@example.com"))
            .to_request();
        let updated: Item = test::call_and_read_body_json(&app, req).await;
        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.id, Some(id));

        // delete
        let req = test::TestRequest::delete()
            .uri(&format!("/api/items/{}", id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let req = test::TestRequest::get()
            .uri(&format!("/api/items/{}", id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_email_validation_at_boundary() {
        let store: Arc<dyn ItemStore> = Arc::new(MemoryItemStore::new());
        let app = test::init_service(HttpServer::create_app(app_state(store.clone()))).await;

        let req = test::TestRequest::post()
            .uri("/api/items")
            .set_json(ItemFactory::payload("Bad", "invalid-email"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post()
            .uri("/api/items")
            .set_json(ItemFactory::payload("Good", "a@b.com"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        assert_eq!(store.list_ids().await.unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn test_process_two_new_items() {
        let store: Arc<dyn ItemStore> = Arc::new(MemoryItemStore::new());
        seed(store.as_ref(), 2).await;
        let app = test::init_service(HttpServer::create_app(app_state(store.clone()))).await;

        let req = test::TestRequest::get().uri("/api/items/process").to_request();
        let processed: Vec<Item> = test::call_and_read_body_json(&app, req).await;

        assert_eq!(processed.len(), 2);
        assert!(processed.iter().all(|item| item.status == ItemStatus::Processed));

        let req = test::TestRequest::get().uri("/api/items").to_request();
        let listed: Vec<Item> = test::call_and_read_body_json(&app, req).await;
        assert!(listed.iter().all(Item::is_processed));
    }

    #[actix_web::test]
    async fn test_process_surfaces_partial_failure() {
        let store = FlakyStore::with_items(ItemFactory::many(10)).failing_on(5);
        let app = test::init_service(HttpServer::create_app(app_state(Arc::new(store)))).await;

        let req = test::TestRequest::get().uri("/api/items/process").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers().get(FAILED_COUNT_HEADER).unwrap(), "1");
        assert_eq!(resp.headers().get(FAILED_IDS_HEADER).unwrap(), "5");

        let processed: Vec<Item> = test::read_body_json(resp).await;
        assert_eq!(processed.len(), 9);
        assert!(processed.iter().all(|item| item.id != Some(5)));
    }

    #[actix_web::test]
    async fn test_process_detailed_reports_skips() {
        let store = FlakyStore::with_items(ItemFactory::many(3)).vanishing(2);
        let app = test::init_service(HttpServer::create_app(app_state(Arc::new(store)))).await;

        let req = test::TestRequest::get()
            .uri("/api/items/process?detailed=true")
            .to_request();
        let report: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(report["total"], 3);
        assert_eq!(report["skipped"], serde_json::json!([2]));
        assert_eq!(report["processed"].as_array().unwrap().len(), 2);
        assert!(report["failures"].as_array().unwrap().is_empty());
        assert!(report["duration_ms"].is_u64());
    }

    #[actix_web::test]
    async fn test_post_with_id_upserts() {
        let store: Arc<dyn ItemStore> = Arc::new(MemoryItemStore::new());
        let app = test::init_service(HttpServer::create_app(app_state(store.clone()))).await;

        for name in ["First", "Second"] {
            let mut body = ItemFactory::payload(name, "a@b.com");
            body["id"] = serde_json::json!(42);
            let req = test::TestRequest::post()
                .uri("/api/items")
                .set_json(body)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::CREATED);
        }

        let stored = store.find_by_id(42).await.unwrap().unwrap();
        assert_eq!(stored.name, "Second");
        assert_eq!(store.list_ids().await.unwrap(), vec![42]);
    }

    #[actix_web::test]
    async fn test_unknown_status_is_rejected() {
        let store: Arc<dyn ItemStore> = Arc::new(MemoryItemStore::new());
        let app = test::init_service(HttpServer::create_app(app_state(store))).await;

        let mut body = ItemFactory::payload("Item1", "a@b.com");
        body["status"] = serde_json::json!("DONE");
        let req = test::TestRequest::post()
            .uri("/api/items")
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
