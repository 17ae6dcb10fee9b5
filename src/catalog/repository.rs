//! Repository Contract
//!
//! Durable storage of products and categories as seen by the catalog service.

use async_trait::async_trait;
use thiserror::Error;

use super::{Category, CategoryId, Product, ProductId, ProductInput};

// == Repository Error ==
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// Target row does not exist
    #[error("entity not found")]
    NotFound,

    /// Referential integrity: the category does not exist
    #[error("category {0} does not exist")]
    UnknownCategory(CategoryId),

    /// The store could not be reached or failed
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Convenience Result type for repository calls.
pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;

// == Product Repository ==
/// Product storage. Identity generation and referential integrity belong here.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All products, ordered by id ascending, with `category` joined when possible.
    async fn list_products(&self) -> RepositoryResult<Vec<Product>>;

    async fn get_product(&self, id: ProductId) -> RepositoryResult<Option<Product>>;

    /// Stores a new product and returns it with its assigned id.
    async fn insert_product(&self, product: ProductInput) -> RepositoryResult<Product>;

    /// Replaces an existing product; `NotFound` when the id is unknown.
    async fn replace_product(&self, product: Product) -> RepositoryResult<()>;

    /// Removes a product; `NotFound` when the id is unknown.
    async fn remove_product(&self, id: ProductId) -> RepositoryResult<()>;

    /// Native category listing, if this store provides one.
    ///
    /// Stores that return `None` get categories derived from their products.
    fn categories(&self) -> Option<&dyn CategoryRepository> {
        None
    }
}

// == Category Repository ==
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
}
