use async_trait::async_trait;
use sea_orm::sea_query::{Expr, ExprTrait, Func};
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel, Order,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::{
    entity,
    error::{ProductError, ProductResult},
    models::{CreateProduct, PageQuery, Product, ProductPage, UpdateProduct},
    repository::{validate_create, validate_update, ProductRepository},
};

/// Postgres-backed implementation of ProductRepository
pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn db_error(e: DbErr) -> ProductError {
    ProductError::Internal(format!("Database error: {}", e))
}

/// Maps a sort field name to its column. Unknown fields sort by id.
fn sort_column(field: &str) -> entity::Column {
    match field {
        "name" => entity::Column::Name,
        "sku" => entity::Column::Sku,
        "category" => entity::Column::Category,
        "quantity" => entity::Column::Quantity,
        "price" => entity::Column::Price,
        "lastUpdated" | "last_updated" => entity::Column::LastUpdated,
        _ => entity::Column::Id,
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        validate_create(&input)?;

        let active_model: entity::ActiveModel = input.into();
        let model = active_model.insert(&self.db).await.map_err(db_error)?;

        tracing::info!(product_id = model.id, "Created product");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error)?;

        Ok(model.map(|m| m.into()))
    }

    async fn list(&self) -> ProductResult<Vec<Product>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn list_page(&self, query: PageQuery) -> ProductResult<ProductPage> {
        let direction = if query.descending() {
            Order::Desc
        } else {
            Order::Asc
        };

        let paginator = entity::Entity::find()
            .order_by(sort_column(&query.sort_by), direction)
            .paginate(&self.db, query.page_size());

        let totals = paginator.num_items_and_pages().await.map_err(db_error)?;
        let models = paginator.fetch_page(query.page).await.map_err(db_error)?;

        Ok(ProductPage {
            content: models.into_iter().map(|m| m.into()).collect(),
            total_elements: totals.number_of_items,
            total_pages: totals.number_of_pages,
        })
    }

    async fn find_by_category(&self, category: &str) -> ProductResult<Vec<Product>> {
        let models = entity::Entity::find()
            .filter(
                Expr::expr(Func::lower(Expr::col(entity::Column::Category)))
                    .eq(category.to_lowercase()),
            )
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn search_by_name(&self, name: &str) -> ProductResult<Vec<Product>> {
        let models = entity::Entity::find()
            .filter(
                Expr::expr(Func::lower(Expr::col(entity::Column::Name)))
                    .like(format!("%{}%", name.to_lowercase())),
            )
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn find_by_max_price(&self, price: f64) -> ProductResult<Vec<Product>> {
        let models = entity::Entity::find()
            .filter(entity::Column::Price.lte(price))
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn find_by_min_price(&self, price: f64) -> ProductResult<Vec<Product>> {
        let models = entity::Entity::find()
            .filter(entity::Column::Price.gte(price))
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn update(&self, id: i64, input: UpdateProduct) -> ProductResult<Product> {
        validate_update(&input)?;

        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error)?
            .ok_or(ProductError::NotFound(id))?;

        let mut active_model = model.into_active_model();
        if let Some(name) = input.name {
            active_model.name = Set(name);
        }
        if let Some(sku) = input.sku {
            active_model.sku = Set(Some(sku));
        }
        if let Some(category) = input.category {
            active_model.category = Set(category);
        }
        if let Some(quantity) = input.quantity {
            active_model.quantity = Set(quantity);
        }
        if let Some(price) = input.price {
            active_model.price = Set(price);
        }
        active_model.last_updated = Set(chrono::Utc::now().into());

        let updated = active_model.update(&self.db).await.map_err(db_error)?;

        tracing::info!(product_id = id, "Updated product");
        Ok(updated.into())
    }

    async fn delete(&self, id: i64) -> ProductResult<bool> {
        let result = entity::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error)?;

        if result.rows_affected > 0 {
            tracing::info!(product_id = id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
