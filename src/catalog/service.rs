//! Catalog Service
//!
//! Single entry point for catalog reads and writes. Reads go through the
//! product list cache; every successful write discards it.

use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;

use tracing::{debug, info};

use crate::cache::{Lookup, ProductListCache};
use crate::catalog::{
    Category, Product, ProductId, ProductInput, ProductRepository, RepositoryError,
};
use crate::error::{CatalogError, Result};

/// Number of products shown by the "recent products" listing.
pub const DEFAULT_RECENT_COUNT: usize = 10;

// == Catalog Service ==
pub struct CatalogService {
    repo: Arc<dyn ProductRepository>,
    cache: Arc<ProductListCache>,
}

impl CatalogService {
    // == Constructor ==
    pub fn new(repo: Arc<dyn ProductRepository>, cache: Arc<ProductListCache>) -> Self {
        if repo.categories().is_some() {
            debug!("Repository lists categories natively");
        } else {
            debug!("Repository has no category listing; deriving categories from products");
        }
        Self { repo, cache }
    }

    pub fn cache(&self) -> &Arc<ProductListCache> {
        &self.cache
    }

    // == List All ==
    /// Full product list, ordered by id, from the cache or the repository.
    pub async fn list_all(&self) -> Result<Arc<Vec<Product>>> {
        let generation = match self.cache.lookup().await {
            Lookup::Hit(products) => return Ok(products),
            Lookup::Miss { generation } => generation,
        };

        let products = self
            .repo
            .list_products()
            .await
            .map_err(|e| CatalogError::persistence("list_products", None, e))?;
        let products = Arc::new(products);

        self.cache.populate(generation, products.clone()).await;
        Ok(products)
    }

    // == Get By Id ==
    /// Looks the product up in the full list. `None` when it does not exist.
    pub async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>> {
        let products = self.list_all().await?;
        Ok(products.iter().find(|p| p.id == id).cloned())
    }

    // == Recent ==
    /// The `count` products with the highest ids, newest first.
    pub async fn recent_products(&self, count: usize) -> Result<Vec<Product>> {
        let products = self.list_all().await?;
        Ok(products.iter().rev().take(count).cloned().collect())
    }

    // == Create ==
    /// Validates and stores a new product, returning it with its assigned id.
    pub async fn create(&self, input: ProductInput) -> Result<Product> {
        input.validate()?;

        let repo = self.repo.clone();
        let cache = self.cache.clone();
        let created = run_to_completion(async move {
            let created = repo.insert_product(input).await?;
            cache.invalidate().await;
            Ok::<_, RepositoryError>(created)
        })
        .await?
        .map_err(|e| CatalogError::persistence("insert_product", None, e))?;

        info!(id = created.id, "Product created");
        Ok(created)
    }

    // == Update ==
    /// Replaces product `id`. Returns false, leaving the cache alone, if it does not exist.
    pub async fn update(&self, id: ProductId, input: ProductInput) -> Result<bool> {
        input.validate()?;

        let repo = self.repo.clone();
        let cache = self.cache.clone();
        let outcome = run_to_completion(async move {
            repo.replace_product(input.with_id(id)).await?;
            cache.invalidate().await;
            Ok::<_, RepositoryError>(())
        })
        .await?;

        match outcome {
            Ok(()) => {
                info!(id, "Product updated");
                Ok(true)
            }
            Err(RepositoryError::NotFound) => Ok(false),
            Err(e) => Err(CatalogError::persistence("replace_product", Some(id), e)),
        }
    }

    // == Delete ==
    /// Removes product `id`. Returns false, leaving the cache alone, if it does not exist.
    pub async fn delete(&self, id: ProductId) -> Result<bool> {
        let repo = self.repo.clone();
        let cache = self.cache.clone();
        let outcome = run_to_completion(async move {
            repo.remove_product(id).await?;
            cache.invalidate().await;
            Ok::<_, RepositoryError>(())
        })
        .await?;

        match outcome {
            Ok(()) => {
                info!(id, "Product deleted");
                Ok(true)
            }
            Err(RepositoryError::NotFound) => Ok(false),
            Err(e) => Err(CatalogError::persistence("remove_product", Some(id), e)),
        }
    }

    // == Categories ==
    /// Categories from the repository, or derived from the product list when
    /// the repository cannot list them.
    ///
    /// Derived listings only contain categories that have at least one product.
    pub async fn list_categories(&self) -> Result<Vec<Category>> {
        if let Some(categories) = self.repo.categories() {
            return categories
                .list_categories()
                .await
                .map_err(|e| CatalogError::persistence("list_categories", None, e));
        }

        let products = self.list_all().await?;
        Ok(derive_categories(&products))
    }

    // == Invalidate ==
    pub async fn invalidate_cache(&self) {
        self.cache.invalidate().await;
    }
}

/// One category per distinct `category_id`, in order of first appearance.
fn derive_categories(products: &[Product]) -> Vec<Category> {
    let mut seen = HashSet::new();
    products
        .iter()
        .filter(|p| p.category_id != 0 && seen.insert(p.category_id))
        .map(|p| match &p.category {
            Some(category) => category.clone(),
            None => Category::new(p.category_id, format!("Category {}", p.category_id)),
        })
        .collect()
}

/// Runs a repository write on its own task so that it finishes even if the
/// caller is dropped after the write was issued.
async fn run_to_completion<F, T>(write: F) -> Result<T>
where
    F: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    tokio::spawn(write)
        .await
        .map_err(|e| CatalogError::Internal(format!("repository write task failed: {e}")))
}
