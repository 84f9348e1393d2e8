use async_trait::async_trait;
use chrono::Utc;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, PageQuery, Product, ProductPage, UpdateProduct};

/// Repository trait for Product persistence
///
/// Every write path validates its input and stamps `last_updated` before
/// persisting, so the store never holds a product that violates the field
/// constraints.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Create a new product; the store assigns the id
    async fn create(&self, input: CreateProduct) -> ProductResult<Product>;

    /// Get a product by ID
    async fn get_by_id(&self, id: i64) -> ProductResult<Option<Product>>;

    /// List all products, ordered by id
    async fn list(&self) -> ProductResult<Vec<Product>>;

    /// List one page of products, sorted per the query
    async fn list_page(&self, query: PageQuery) -> ProductResult<ProductPage>;

    /// List products whose category matches, ignoring case
    async fn find_by_category(&self, category: &str) -> ProductResult<Vec<Product>>;

    /// List products whose name contains the fragment, ignoring case
    async fn search_by_name(&self, name: &str) -> ProductResult<Vec<Product>>;

    /// List products priced at or below the given price
    async fn find_by_max_price(&self, price: f64) -> ProductResult<Vec<Product>>;

    /// List products priced at or above the given price
    async fn find_by_min_price(&self, price: f64) -> ProductResult<Vec<Product>>;

    /// Overwrite the provided fields of an existing product
    async fn update(&self, id: i64, input: UpdateProduct) -> ProductResult<Product>;

    /// Delete a product by ID; returns whether a row was removed
    async fn delete(&self, id: i64) -> ProductResult<bool>;
}

/// Validation run by every repository implementation before an insert
pub(crate) fn validate_create(input: &CreateProduct) -> ProductResult<()> {
    input
        .validate()
        .map_err(|e| ProductError::Validation(e.to_string()))
}

/// Validation run by every repository implementation before an update
pub(crate) fn validate_update(input: &UpdateProduct) -> ProductResult<()> {
    input
        .validate()
        .map_err(|e| ProductError::Validation(e.to_string()))
}

/// Comparator matching the sort fields exposed by the paginated listing.
/// Unknown fields sort by id.
pub(crate) fn compare_by_field(a: &Product, b: &Product, field: &str) -> Ordering {
    match field {
        "name" => a.name.cmp(&b.name),
        "sku" => a.sku.cmp(&b.sku),
        "category" => a.category.cmp(&b.category),
        "quantity" => a.quantity.cmp(&b.quantity),
        "price" => a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal),
        "lastUpdated" | "last_updated" => a.last_updated.cmp(&b.last_updated),
        _ => a.id.cmp(&b.id),
    }
}

#[derive(Debug, Default)]
struct Store {
    products: HashMap<i64, Product>,
    next_id: i64,
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        validate_create(&input)?;

        let mut store = self.store.write().await;
        store.next_id += 1;

        let product = Product {
            id: store.next_id,
            name: input.name,
            sku: input.sku,
            category: input.category,
            quantity: input.quantity,
            price: input.price,
            last_updated: Utc::now(),
        };
        store.products.insert(product.id, product.clone());

        tracing::info!(product_id = product.id, "Created product");
        Ok(product)
    }

    async fn get_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let store = self.store.read().await;
        Ok(store.products.get(&id).cloned())
    }

    async fn list(&self) -> ProductResult<Vec<Product>> {
        let store = self.store.read().await;
        let mut result: Vec<Product> = store.products.values().cloned().collect();
        result.sort_by_key(|p| p.id);
        Ok(result)
    }

    async fn list_page(&self, query: PageQuery) -> ProductResult<ProductPage> {
        let store = self.store.read().await;

        let mut result: Vec<Product> = store.products.values().cloned().collect();
        result.sort_by(|a, b| {
            let ordering = compare_by_field(a, b, &query.sort_by);
            if query.descending() {
                ordering.reverse()
            } else {
                ordering
            }
        });

        let size = query.page_size();
        let total_elements = result.len() as u64;
        let total_pages = total_elements.div_ceil(size);

        let content: Vec<Product> = result
            .into_iter()
            .skip(query.page.saturating_mul(size) as usize)
            .take(size as usize)
            .collect();

        Ok(ProductPage {
            content,
            total_elements,
            total_pages,
        })
    }

    async fn find_by_category(&self, category: &str) -> ProductResult<Vec<Product>> {
        let store = self.store.read().await;
        let needle = category.to_lowercase();

        let mut result: Vec<Product> = store
            .products
            .values()
            .filter(|p| p.category.to_lowercase() == needle)
            .cloned()
            .collect();
        result.sort_by_key(|p| p.id);
        Ok(result)
    }

    async fn search_by_name(&self, name: &str) -> ProductResult<Vec<Product>> {
        let store = self.store.read().await;
        let needle = name.to_lowercase();

        let mut result: Vec<Product> = store
            .products
            .values()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        result.sort_by_key(|p| p.id);
        Ok(result)
    }

    async fn find_by_max_price(&self, price: f64) -> ProductResult<Vec<Product>> {
        let store = self.store.read().await;

        let mut result: Vec<Product> = store
            .products
            .values()
            .filter(|p| p.price <= price)
            .cloned()
            .collect();
        result.sort_by_key(|p| p.id);
        Ok(result)
    }

    async fn find_by_min_price(&self, price: f64) -> ProductResult<Vec<Product>> {
        let store = self.store.read().await;

        let mut result: Vec<Product> = store
            .products
            .values()
            .filter(|p| p.price >= price)
            .cloned()
            .collect();
        result.sort_by_key(|p| p.id);
        Ok(result)
    }

    async fn update(&self, id: i64, input: UpdateProduct) -> ProductResult<Product> {
        validate_update(&input)?;

        let mut store = self.store.write().await;
        let product = store
            .products
            .get_mut(&id)
            .ok_or(ProductError::NotFound(id))?;

        if let Some(name) = input.name {
            product.name = name;
        }
        if let Some(sku) = input.sku {
            product.sku = Some(sku);
        }
        if let Some(category) = input.category {
            product.category = category;
        }
        if let Some(quantity) = input.quantity {
            product.quantity = quantity;
        }
        if let Some(price) = input.price {
            product.price = price;
        }
        product.last_updated = Utc::now();
        let updated = product.clone();

        tracing::info!(product_id = id, "Updated product");
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> ProductResult<bool> {
        let mut store = self.store.write().await;

        if store.products.remove(&id).is_some() {
            tracing::info!(product_id = id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget(name: &str, category: &str, quantity: i32, price: f64) -> CreateProduct {
        CreateProduct {
            name: name.to_string(),
            sku: None,
            category: category.to_string(),
            quantity,
            price,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids_and_stamps_timestamp() {
        let repo = InMemoryProductRepository::new();

        let first = repo.create(widget("Hammer", "tools", 10, 9.99)).await.unwrap();
        let second = repo.create(widget("Drill", "tools", 4, 79.99)).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert!(first.last_updated <= Utc::now());
    }

    #[tokio::test]
    async fn test_create_rejects_blank_category() {
        let repo = InMemoryProductRepository::new();

        let result = repo.create(widget("Hammer", "  ", 1, 9.99)).await;

        assert!(matches!(result, Err(ProductError::Validation(_))));
        assert!(repo.list().await.unwrap().is_empty(), "nothing persisted");
    }

    #[tokio::test]
    async fn test_category_match_ignores_case() {
        let repo = InMemoryProductRepository::new();
        repo.create(widget("Hammer", "Tools", 10, 9.99)).await.unwrap();
        repo.create(widget("Apple", "Groceries", 50, 0.5)).await.unwrap();

        let found = repo.find_by_category("tOOls").await.unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Hammer");
    }

    #[tokio::test]
    async fn test_name_search_matches_substring_ignoring_case() {
        let repo = InMemoryProductRepository::new();
        repo.create(widget("Claw Hammer", "tools", 10, 9.99)).await.unwrap();
        repo.create(widget("Sledgehammer", "tools", 2, 24.99)).await.unwrap();
        repo.create(widget("Drill", "tools", 4, 79.99)).await.unwrap();

        let found = repo.search_by_name("HAMMER").await.unwrap();

        assert_eq!(found.len(), 2);
    }

    #[tokio::test]
    async fn test_price_filters_are_inclusive() {
        let repo = InMemoryProductRepository::new();
        repo.create(widget("Cheap", "misc", 1, 5.0)).await.unwrap();
        repo.create(widget("Exact", "misc", 1, 10.0)).await.unwrap();
        repo.create(widget("Pricey", "misc", 1, 15.0)).await.unwrap();

        let cheaper = repo.find_by_max_price(10.0).await.unwrap();
        let pricier = repo.find_by_min_price(10.0).await.unwrap();

        assert_eq!(cheaper.len(), 2);
        assert_eq!(pricier.len(), 2);
    }

    #[tokio::test]
    async fn test_page_sorting_and_totals() {
        let repo = InMemoryProductRepository::new();
        for (name, price) in [("A", 3.0), ("B", 1.0), ("C", 2.0)] {
            repo.create(widget(name, "misc", 1, price)).await.unwrap();
        }

        let page = repo
            .list_page(PageQuery {
                page: 0,
                size: 2,
                sort_by: "price".to_string(),
                order: "desc".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(page.total_elements, 3);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.content.len(), 2);
        assert_eq!(page.content[0].name, "A");
        assert_eq!(page.content[1].name, "C");
    }

    #[tokio::test]
    async fn test_unknown_sort_field_falls_back_to_id() {
        let repo = InMemoryProductRepository::new();
        repo.create(widget("B", "misc", 1, 2.0)).await.unwrap();
        repo.create(widget("A", "misc", 1, 1.0)).await.unwrap();

        let page = repo
            .list_page(PageQuery {
                sort_by: "bogus".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(page.content[0].name, "B", "first inserted id comes first");
    }

    #[tokio::test]
    async fn test_page_past_the_end_is_empty() {
        let repo = InMemoryProductRepository::new();
        repo.create(widget("A", "misc", 1, 1.0)).await.unwrap();

        let page = repo
            .list_page(PageQuery {
                page: 7,
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(page.content.is_empty());
        assert_eq!(page.total_elements, 1);
    }

    #[tokio::test]
    async fn test_huge_page_index_is_empty_not_a_panic() {
        let repo = InMemoryProductRepository::new();
        repo.create(widget("A", "misc", 1, 1.0)).await.unwrap();

        let page = repo
            .list_page(PageQuery {
                page: u64::MAX,
                size: 5,
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(page.content.is_empty());
        assert_eq!(page.total_elements, 1);
    }

    #[tokio::test]
    async fn test_update_overwrites_provided_fields_and_restamps() {
        let repo = InMemoryProductRepository::new();
        let created = repo.create(widget("Hammer", "tools", 10, 9.99)).await.unwrap();

        let updated = repo
            .update(
                created.id,
                UpdateProduct {
                    price: Some(12.5),
                    quantity: Some(8),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Hammer");
        assert_eq!(updated.price, 12.5);
        assert_eq!(updated.quantity, 8);
        assert!(updated.last_updated >= created.last_updated);
    }

    #[tokio::test]
    async fn test_update_missing_product_is_not_found() {
        let repo = InMemoryProductRepository::new();

        let result = repo.update(42, UpdateProduct::default()).await;

        assert!(matches!(result, Err(ProductError::NotFound(42))));
    }

    #[tokio::test]
    async fn test_update_rejects_negative_price() {
        let repo = InMemoryProductRepository::new();
        let created = repo.create(widget("Hammer", "tools", 10, 9.99)).await.unwrap();

        let result = repo
            .update(
                created.id,
                UpdateProduct {
                    price: Some(-1.0),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(ProductError::Validation(_))));
        let stored = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(stored.price, 9.99, "stored price unchanged");
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let repo = InMemoryProductRepository::new();
        let created = repo.create(widget("Hammer", "tools", 10, 9.99)).await.unwrap();

        assert!(repo.delete(created.id).await.unwrap());
        assert!(!repo.delete(created.id).await.unwrap());
    }
}
