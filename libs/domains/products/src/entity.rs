use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::{NotSet, Set};
use serde::{Deserialize, Serialize};

/// Sea-ORM Entity for the products table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub sku: Option<String>,
    pub category: String,
    pub quantity: i32,
    pub price: f64,
    pub last_updated: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::Product {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            sku: model.sku,
            category: model.category,
            quantity: model.quantity,
            price: model.price,
            last_updated: model.last_updated.into(),
        }
    }
}

// The id stays NotSet so the database assigns it; last_updated is stamped
// at conversion time.
impl From<crate::models::CreateProduct> for ActiveModel {
    fn from(input: crate::models::CreateProduct) -> Self {
        ActiveModel {
            id: NotSet,
            name: Set(input.name),
            sku: Set(input.sku),
            category: Set(input.category),
            quantity: Set(input.quantity),
            price: Set(input.price),
            last_updated: Set(chrono::Utc::now().into()),
        }
    }
}
