use std::sync::Arc;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, PageQuery, Product, ProductPage, UpdateProduct};
use crate::repository::ProductRepository;

/// Service layer for Product business logic
///
/// The repository is injected at construction, so handlers and tests can run
/// against any `ProductRepository` implementation.
#[derive(Clone)]
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new product
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        self.repository.create(input).await
    }

    /// Get a product by ID
    pub async fn get_product(&self, id: i64) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// List all products
    pub async fn list_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.list().await
    }

    /// List one page of products
    pub async fn page_products(&self, query: PageQuery) -> ProductResult<ProductPage> {
        self.repository.list_page(query).await
    }

    /// List products in a category, matched case-insensitively
    pub async fn products_by_category(&self, category: &str) -> ProductResult<Vec<Product>> {
        self.repository.find_by_category(category).await
    }

    /// List products whose name contains the fragment, case-insensitively
    pub async fn search_products(&self, name: &str) -> ProductResult<Vec<Product>> {
        self.repository.search_by_name(name).await
    }

    /// List products priced at or below the threshold
    pub async fn products_cheaper_than(&self, price: f64) -> ProductResult<Vec<Product>> {
        self.repository.find_by_max_price(price).await
    }

    /// List products priced at or above the threshold
    pub async fn products_more_expensive_than(&self, price: f64) -> ProductResult<Vec<Product>> {
        self.repository.find_by_min_price(price).await
    }

    /// Update a product
    pub async fn update_product(&self, id: i64, input: UpdateProduct) -> ProductResult<Product> {
        self.repository.update(id, input).await
    }

    /// Delete a product. Deleting an id that does not exist is a no-op.
    pub async fn delete_product(&self, id: i64) -> ProductResult<()> {
        let deleted = self.repository.delete(id).await?;
        if !deleted {
            tracing::debug!(product_id = id, "Delete requested for missing product");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockProductRepository;
    use chrono::Utc;
    use mockall::predicate::eq;

    fn hammer(id: i64) -> Product {
        Product {
            id,
            name: "Hammer".to_string(),
            sku: Some("TL-001".to_string()),
            category: "tools".to_string(),
            quantity: 10,
            price: 9.99,
            last_updated: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_get_product_maps_missing_to_not_found() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_get_by_id()
            .with(eq(42))
            .returning(|_| Ok(None));

        let service = ProductService::new(mock_repo);
        let result = service.get_product(42).await;

        assert!(matches!(result, Err(ProductError::NotFound(42))));
    }

    #[tokio::test]
    async fn test_get_product_returns_existing() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_get_by_id()
            .with(eq(1))
            .returning(|id| Ok(Some(hammer(id))));

        let service = ProductService::new(mock_repo);
        let product = service.get_product(1).await.unwrap();

        assert_eq!(product.name, "Hammer");
    }

    #[tokio::test]
    async fn test_delete_product_is_ok_for_missing_id() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_delete()
            .with(eq(99))
            .returning(|_| Ok(false));

        let service = ProductService::new(mock_repo);

        assert!(service.delete_product(99).await.is_ok());
    }

    #[tokio::test]
    async fn test_category_query_passes_through() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_by_category()
            .with(eq("tools"))
            .returning(|_| Ok(vec![hammer(1)]));

        let service = ProductService::new(mock_repo);
        let products = service.products_by_category("tools").await.unwrap();

        assert_eq!(products.len(), 1);
    }
}
