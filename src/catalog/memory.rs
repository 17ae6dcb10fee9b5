//! In-Memory Repository
//!
//! A `ProductRepository` backed by ordered maps, used by the server binary and tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::sync::RwLock;

use super::repository::{CategoryRepository, ProductRepository, RepositoryError, RepositoryResult};
use super::{Category, CategoryId, Product, ProductId, ProductInput};

#[derive(Debug, Default)]
struct Tables {
    categories: BTreeMap<CategoryId, Category>,
    products: BTreeMap<ProductId, Product>,
    next_product_id: ProductId,
}

impl Tables {
    fn join(&self, product: &Product) -> Product {
        let mut joined = product.clone();
        joined.category = self.categories.get(&product.category_id).cloned();
        joined
    }

    fn check_category(&self, id: CategoryId) -> RepositoryResult<()> {
        if self.categories.contains_key(&id) {
            Ok(())
        } else {
            Err(RepositoryError::UnknownCategory(id))
        }
    }
}

// == In-Memory Repository ==
/// Thread-safe in-memory catalog store with sequential product ids.
#[derive(Debug)]
pub struct InMemoryRepository {
    tables: RwLock<Tables>,
}

impl InMemoryRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables {
                next_product_id: 1,
                ..Tables::default()
            }),
        }
    }

    /// Creates a repository holding the given categories and products.
    ///
    /// Products keep their ids; the id sequence continues after the highest one.
    pub fn with_data(categories: Vec<Category>, products: Vec<Product>) -> Self {
        let next_product_id = products.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        let tables = Tables {
            categories: categories.into_iter().map(|c| (c.id, c)).collect(),
            products: products
                .into_iter()
                .map(|p| (p.id, Product { category: None, ..p }))
                .collect(),
            next_product_id,
        };
        Self {
            tables: RwLock::new(tables),
        }
    }

    /// Repository holding the initial sports catalog.
    pub fn seeded() -> Self {
        let categories = vec![
            Category::new(1, "Balls"),
            Category::new(2, "Footwear"),
            Category::new(3, "Clothing"),
        ];
        let products = vec![
            seed_product(1, "Soccer Ball", "Size 5 training ball", 250, 20, 1),
            seed_product(2, "Rugby Boots", "Studded boots", 700, 15, 2),
            seed_product(3, "Custom Jersey", "Team jersey", 300, 30, 3),
        ];
        Self::with_data(categories, products)
    }

    /// Adds or renames a category.
    pub async fn put_category(&self, category: Category) {
        let mut tables = self.tables.write().await;
        tables.categories.insert(category.id, category);
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn seed_product(
    id: ProductId,
    name: &str,
    description: &str,
    base_price: i64,
    markup_percentage: i32,
    category_id: CategoryId,
) -> Product {
    ProductInput {
        name: name.to_string(),
        description: Some(description.to_string()),
        base_price: Decimal::from(base_price),
        markup_percentage,
        category_id,
    }
    .with_id(id)
}

#[async_trait]
impl ProductRepository for InMemoryRepository {
    async fn list_products(&self) -> RepositoryResult<Vec<Product>> {
        let tables = self.tables.read().await;
        // BTreeMap iteration is already ordered by id
        Ok(tables.products.values().map(|p| tables.join(p)).collect())
    }

    async fn get_product(&self, id: ProductId) -> RepositoryResult<Option<Product>> {
        let tables = self.tables.read().await;
        Ok(tables.products.get(&id).map(|p| tables.join(p)))
    }

    async fn insert_product(&self, product: ProductInput) -> RepositoryResult<Product> {
        let mut tables = self.tables.write().await;
        tables.check_category(product.category_id)?;

        let id = tables.next_product_id;
        tables.next_product_id += 1;

        let stored = product.with_id(id);
        tables.products.insert(id, stored.clone());
        Ok(tables.join(&stored))
    }

    async fn replace_product(&self, product: Product) -> RepositoryResult<()> {
        let mut tables = self.tables.write().await;
        if !tables.products.contains_key(&product.id) {
            return Err(RepositoryError::NotFound);
        }
        tables.check_category(product.category_id)?;

        let id = product.id;
        tables.products.insert(
            id,
            Product {
                category: None,
                ..product
            },
        );
        Ok(())
    }

    async fn remove_product(&self, id: ProductId) -> RepositoryResult<()> {
        let mut tables = self.tables.write().await;
        tables
            .products
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }

    fn categories(&self) -> Option<&dyn CategoryRepository> {
        Some(self)
    }
}

#[async_trait]
impl CategoryRepository for InMemoryRepository {
    async fn list_categories(&self) -> RepositoryResult<Vec<Category>> {
        let tables = self.tables.read().await;
        Ok(tables.categories.values().cloned().collect())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, category_id: CategoryId) -> ProductInput {
        ProductInput {
            name: name.to_string(),
            description: None,
            base_price: Decimal::from(10),
            markup_percentage: 5,
            category_id,
        }
    }

    #[tokio::test]
    async fn test_seeded_products_ordered_and_joined() {
        let repo = InMemoryRepository::seeded();
        let products = repo.list_products().await.unwrap();

        let ids: Vec<ProductId> = products.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(products[1].category.as_ref().unwrap().name, "Footwear");
    }

    #[tokio::test]
    async fn test_insert_assigns_next_id() {
        let repo = InMemoryRepository::seeded();
        let created = repo.insert_product(input("Cones", 1)).await.unwrap();

        assert_eq!(created.id, 4);
        assert_eq!(created.category.unwrap().name, "Balls");
        assert!(repo.get_product(4).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_insert_unknown_category_rejected() {
        let repo = InMemoryRepository::seeded();
        let result = repo.insert_product(input("Mystery", 42)).await;

        assert_eq!(result, Err(RepositoryError::UnknownCategory(42)));
        assert_eq!(repo.list_products().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_replace_and_remove_missing() {
        let repo = InMemoryRepository::seeded();

        let ghost = input("Ghost", 1).with_id(99);
        assert_eq!(
            repo.replace_product(ghost).await,
            Err(RepositoryError::NotFound)
        );
        assert_eq!(repo.remove_product(99).await, Err(RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_replace_existing() {
        let repo = InMemoryRepository::seeded();
        repo.replace_product(input("Match Ball", 1).with_id(1))
            .await
            .unwrap();

        let stored = repo.get_product(1).await.unwrap().unwrap();
        assert_eq!(stored.name, "Match Ball");
    }

    #[tokio::test]
    async fn test_native_categories() {
        let repo = InMemoryRepository::seeded();
        let categories = repo.categories().unwrap().list_categories().await.unwrap();
        let names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Balls", "Footwear", "Clothing"]);
    }
}
