//! Response DTOs
//!
//! Outgoing JSON bodies.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::cache::CacheStats;
use crate::catalog::{Category, CategoryId, Product, ProductId};

/// A product as served to clients, with its derived final price.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub base_price: Decimal,
    pub markup_percentage: i32,
    pub final_price: Decimal,
    pub category_id: CategoryId,
    pub category: Option<Category>,
}

impl From<&Product> for ProductResponse {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            description: product.description.clone(),
            base_price: product.base_price,
            markup_percentage: product.markup_percentage,
            final_price: product.final_price(),
            category_id: product.category_id,
            category: product.category.clone(),
        }
    }
}

/// Response body for GET /stats
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub invalidations: u64,
    pub expirations: u64,
    pub populated: bool,
    /// hits / (hits + misses)
    pub hit_rate: f64,
    /// Connected real-time subscribers
    pub subscribers: usize,
}

impl StatsResponse {
    pub fn new(stats: &CacheStats, subscribers: usize) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            invalidations: stats.invalidations,
            expirations: stats.expirations,
            populated: stats.populated,
            hit_rate: stats.hit_rate(),
            subscribers,
        }
    }
}

/// Response body for GET /health
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
