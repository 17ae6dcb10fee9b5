//! API Handlers
//!
//! JSON endpoints for products and categories, plus health and cache stats.
//! None of these are gated and none of them publish change events.

use std::sync::Arc;

use axum::{
    extract::{FromRef, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use tokio::sync::mpsc;

use super::extract::ApiJson;
use crate::cache::{ProductListCache, SystemClock};
use crate::catalog::{Category, CatalogService, ProductId, ProductRepository};
use crate::config::Config;
use crate::error::{CatalogError, Result};
use crate::models::{HealthResponse, ProductPayload, ProductResponse, StatsResponse};
use crate::notify::{ChangeNotifier, ProductChanged, SubscriberHub};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Cached catalog reads and writes
    pub catalog: Arc<CatalogService>,
    /// The same cache the catalog uses, for stats and the expiry sweep
    pub cache: Arc<ProductListCache>,
    /// Publishing side of the change notification queue
    pub notifier: ChangeNotifier,
    /// Real-time subscribers
    pub hub: SubscriberHub,
}

impl AppState {
    /// Creates a new AppState around an existing cache and notification channel.
    pub fn new(
        repo: Arc<dyn ProductRepository>,
        cache: Arc<ProductListCache>,
        notifier: ChangeNotifier,
        hub: SubscriberHub,
    ) -> Self {
        Self {
            catalog: Arc::new(CatalogService::new(repo, cache.clone())),
            cache,
            notifier,
            hub,
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Returns the receiving end of the notification queue, which the caller
    /// hands to the dispatcher task.
    pub fn from_config(
        config: &Config,
        repo: Arc<dyn ProductRepository>,
    ) -> (Self, mpsc::Receiver<ProductChanged>) {
        let cache = Arc::new(ProductListCache::new(
            config.expiry_policy(),
            Arc::new(SystemClock),
        ));
        let (notifier, rx) = ChangeNotifier::channel(config.notify_buffer);
        let hub = SubscriberHub::new(config.hub_capacity);
        (Self::new(repo, cache, notifier, hub), rx)
    }
}

impl FromRef<AppState> for SubscriberHub {
    fn from_ref(state: &AppState) -> Self {
        state.hub.clone()
    }
}

fn not_found(id: ProductId) -> CatalogError {
    CatalogError::NotFound(format!("Product {} not found", id))
}

/// Handler for GET /api/products
pub async fn list_products_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductResponse>>> {
    let products = state.catalog.list_all().await?;
    Ok(Json(products.iter().map(ProductResponse::from).collect()))
}

/// Handler for GET /api/products/:id
pub async fn get_product_handler(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<ProductResponse>> {
    let product = state.catalog.get_by_id(id).await?.ok_or_else(|| not_found(id))?;
    Ok(Json(ProductResponse::from(&product)))
}

/// Handler for POST /api/products
///
/// 201 with a `Location` header and the stored product.
pub async fn create_product_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<ProductPayload>,
) -> Result<impl IntoResponse> {
    let created = state.catalog.create(payload.into_input()).await?;
    let location = format!("/api/products/{}", created.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ProductResponse::from(&created)),
    ))
}

/// Handler for PUT /api/products/:id
///
/// The body must carry the same id as the path.
pub async fn update_product_handler(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    ApiJson(payload): ApiJson<ProductPayload>,
) -> Result<StatusCode> {
    if payload.id != Some(id) {
        return Err(CatalogError::InvalidRequest(format!(
            "Body id does not match route id {}",
            id
        )));
    }

    if state.catalog.update(id, payload.into_input()).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// Handler for DELETE /api/products/:id
pub async fn delete_product_handler(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<StatusCode> {
    if state.catalog.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// Handler for GET /api/categories
pub async fn list_categories_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Category>>> {
    Ok(Json(state.catalog.list_categories().await?))
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.cache.stats().await;
    Json(StatsResponse::new(&stats, state.hub.subscriber_count()))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
