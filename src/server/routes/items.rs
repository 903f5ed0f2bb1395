//! Item CRUD and batch processing endpoints

use crate::core::models::{ItemId, ItemPayload};
use crate::server::state::AppState;
use crate::utils::error::{Result, ServiceError};
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use tracing::{debug, info, warn};

/// Number of ids that failed in a batch run
pub const FAILED_COUNT_HEADER: &str = "x-batch-failed-count";
/// Comma separated ids that failed in a batch run
pub const FAILED_IDS_HEADER: &str = "x-batch-failed-ids";

/// Configure item routes
///
/// `/process` is registered ahead of `/{id}` so it is not parsed as an id.
pub fn configure_item_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/items")
            .route("", web::get().to(list_items))
            .route("", web::post().to(create_item))
            .route("/process", web::get().to(process_items))
            .route("/{id}", web::get().to(get_item))
            .route("/{id}", web::put().to(update_item))
            .route("/{id}", web::delete().to(delete_item)),
    );
}

/// JSON extractor config that reports malformed bodies as 400 in the service error format
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| ServiceError::bad_request(err.to_string()).into())
}

/// Path extractor config for non-numeric ids
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|err, _req| ServiceError::bad_request(err.to_string()).into())
}

/// Query parameters for `GET /api/items/process`
#[derive(Debug, Default, Deserialize)]
pub struct ProcessQuery {
    /// Return the whole batch report instead of the processed items
    #[serde(default)]
    pub detailed: bool,
}

/// GET /api/items
pub async fn list_items(state: web::Data<AppState>) -> Result<HttpResponse> {
    let items = state.items().find_all().await?;
    debug!(count = items.len(), "Listing items");
    Ok(HttpResponse::Ok().json(items))
}

/// GET /api/items/{id}
pub async fn get_item(state: web::Data<AppState>, path: web::Path<ItemId>) -> Result<HttpResponse> {
    let id = path.into_inner();
    let item = state
        .items()
        .find_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::not_found(format!("Item {} not found", id)))?;
    Ok(HttpResponse::Ok().json(item))
}

/// POST /api/items
pub async fn create_item(
    state: web::Data<AppState>,
    payload: web::Json<ItemPayload>,
) -> Result<HttpResponse> {
    let payload = payload.into_inner();
    let id = payload.id;
    let item = payload.into_item(id)?;

    let saved = state.items().save(item).await?;
    info!(item_id = ?saved.id, "Created item");
    Ok(HttpResponse::Created().json(saved))
}

/// PUT /api/items/{id}
pub async fn update_item(
    state: web::Data<AppState>,
    path: web::Path<ItemId>,
    payload: web::Json<ItemPayload>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let item = payload.into_inner().into_item(Some(id))?;

    let store = state.items();
    if store.find_by_id(id).await?.is_none() {
        return Err(ServiceError::not_found(format!("Item {} not found", id)));
    }

    let saved = store.save(item).await?;
    info!(item_id = id, "Updated item");
    Ok(HttpResponse::Ok().json(saved))
}

/// DELETE /api/items/{id}
pub async fn delete_item(
    state: web::Data<AppState>,
    path: web::Path<ItemId>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    state.items().delete_by_id(id).await?;
    info!(item_id = id, "Deleted item");
    Ok(HttpResponse::NoContent().finish())
}

/// GET /api/items/process
///
/// Runs the batch processor over every stored item. The body is the list of
/// processed items (or the full report with `?detailed=true`); per-item
/// failures are always surfaced in the `x-batch-failed-*` headers.
pub async fn process_items(
    state: web::Data<AppState>,
    query: web::Query<ProcessQuery>,
) -> Result<HttpResponse> {
    let report = state.processor.process_all().await?;

    let mut response = HttpResponse::Ok();
    response.insert_header((FAILED_COUNT_HEADER, report.failures.len().to_string()));
    if !report.is_complete() {
        let failed_ids = report
            .failed_ids()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        warn!(
            total = report.total,
            failed = report.failures.len(),
            failed_ids = %failed_ids,
            "Batch run completed with failures"
        );
        response.insert_header((FAILED_IDS_HEADER, failed_ids));
    }

    if query.detailed {
        Ok(response.json(&report))
    } else {
        Ok(response.json(&report.processed))
    }
}
