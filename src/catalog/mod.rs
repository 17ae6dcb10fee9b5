//! Catalog Module
//!
//! Products, categories, the repository contract and the catalog service.

mod memory;
mod product;
mod repository;
mod service;

#[cfg(test)]
mod property_tests;

pub use memory::InMemoryRepository;
pub use product::{
    final_price, Category, CategoryId, Product, ProductId, ProductInput, MAX_BASE_PRICE,
    MAX_DESCRIPTION_LENGTH, MAX_MARKUP_PERCENTAGE, MAX_NAME_LENGTH, MIN_BASE_PRICE,
};
pub use repository::{CategoryRepository, ProductRepository, RepositoryError, RepositoryResult};
pub use service::{CatalogService, DEFAULT_RECENT_COUNT};
