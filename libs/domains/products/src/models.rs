use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Custom validator rejecting strings that are empty or whitespace-only
fn validate_not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(validator::ValidationError::new("blank"));
    }
    Ok(())
}

/// Product entity - a single item tracked in inventory
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier, assigned by the store
    pub id: i64,
    /// Product name
    pub name: String,
    /// Optional stock keeping unit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    /// Product category
    pub category: String,
    /// Units in stock
    pub quantity: i32,
    /// Unit price
    pub price: f64,
    /// Timestamp of the last write, stamped by the store
    pub last_updated: DateTime<Utc>,
}

/// DTO for creating a new product
///
/// Any client-supplied `id` or `lastUpdated` field is ignored: the store
/// assigns the identifier and stamps the timestamp.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,
    #[serde(default)]
    pub sku: Option<String>,
    #[validate(custom(function = "validate_not_blank"))]
    pub category: String,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub quantity: i32,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub price: f64,
}

/// DTO for updating an existing product
///
/// Provided fields overwrite the stored values; omitted fields are kept.
/// The store restamps `lastUpdated` on every successful update.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    #[validate(custom(function = "validate_not_blank"))]
    pub name: Option<String>,
    pub sku: Option<String>,
    #[validate(custom(function = "validate_not_blank"))]
    pub category: Option<String>,
    #[validate(range(min = 0))]
    pub quantity: Option<i32>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
}

/// Query parameters for the paginated listing
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    /// Zero-based page index
    #[serde(default)]
    pub page: u64,
    /// Page size
    #[serde(default = "default_page_size")]
    pub size: u64,
    /// Field to sort by; unknown fields fall back to `id`
    #[serde(default = "default_sort_by")]
    pub sort_by: String,
    /// Sort direction; anything other than `desc` (case-insensitive) is
    /// treated as ascending
    #[serde(default = "default_order")]
    pub order: String,
}

fn default_page_size() -> u64 {
    5
}

fn default_sort_by() -> String {
    "id".to_string()
}

fn default_order() -> String {
    "asc".to_string()
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: 0,
            size: default_page_size(),
            sort_by: default_sort_by(),
            order: default_order(),
        }
    }
}

impl PageQuery {
    /// True when the requested direction is descending
    pub fn descending(&self) -> bool {
        self.order.eq_ignore_ascii_case("desc")
    }

    /// Page size clamped to at least one row per page
    pub fn page_size(&self) -> u64 {
        self.size.max(1)
    }
}

/// One page of products plus pagination totals
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub content: Vec<Product>,
    /// Total number of products across all pages
    pub total_elements: u64,
    /// Total number of pages at the requested page size
    pub total_pages: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_name_fails_validation() {
        let input = CreateProduct {
            name: "   ".to_string(),
            sku: None,
            category: "tools".to_string(),
            quantity: 1,
            price: 9.99,
        };

        let err = input.validate().unwrap_err();
        assert!(err.field_errors().contains_key("name"));
    }

    #[test]
    fn test_negative_quantity_fails_validation() {
        let input = CreateProduct {
            name: "Hammer".to_string(),
            sku: None,
            category: "tools".to_string(),
            quantity: -1,
            price: 9.99,
        };

        let err = input.validate().unwrap_err();
        assert!(err.field_errors().contains_key("quantity"));
    }

    #[test]
    fn test_update_allows_omitted_fields() {
        let input = UpdateProduct {
            price: Some(19.99),
            ..Default::default()
        };

        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_page_query_defaults() {
        let query: PageQuery = serde_json::from_str("{}").unwrap();

        assert_eq!(query.page, 0);
        assert_eq!(query.size, 5);
        assert_eq!(query.sort_by, "id");
        assert!(!query.descending());
    }

    #[test]
    fn test_order_is_case_insensitive() {
        let query = PageQuery {
            order: "DESC".to_string(),
            ..Default::default()
        };
        assert!(query.descending());

        let query = PageQuery {
            order: "descending".to_string(),
            ..Default::default()
        };
        assert!(!query.descending(), "anything but 'desc' sorts ascending");
    }

    #[test]
    fn test_page_size_is_clamped() {
        let query = PageQuery {
            size: 0,
            ..Default::default()
        };
        assert_eq!(query.page_size(), 1);
    }
}
