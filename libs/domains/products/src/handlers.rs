use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};
use axum_helpers::{ErrorResponse, ValidatedJson};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::models::{CreateProduct, PageQuery, Product, ProductPage, UpdateProduct};
use crate::repository::ProductRepository;
use crate::service::ProductService;

const TAG: &str = "products";

/// OpenAPI documentation for the Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        page_products,
        create_product,
        update_product,
        delete_product,
        products_by_category,
        search_products,
        products_cheaper_than,
        products_more_expensive_than,
    ),
    components(schemas(Product, CreateProduct, UpdateProduct, ProductPage, ErrorResponse)),
    tags(
        (name = TAG, description = "Inventory product endpoints")
    )
)]
pub struct ApiDoc;

/// Create the product router with all HTTP endpoints
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/page", get(page_products))
        .route("/{id}", put(update_product).delete(delete_product))
        .route("/category/{category}", get(products_by_category))
        .route("/search/{name}", get(search_products))
        .route("/price/less-than/{price}", get(products_cheaper_than))
        .route("/price/greater-than/{price}", get(products_more_expensive_than))
        .with_state(shared_service)
}

/// List all products
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "List of all products", body = Vec<Product>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.list_products().await?;
    Ok(Json(products))
}

/// List one page of products
#[utoipa::path(
    get,
    path = "/page",
    tag = TAG,
    params(PageQuery),
    responses(
        (status = 200, description = "One page of products with totals", body = ProductPage),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn page_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Query(query): Query<PageQuery>,
) -> ProductResult<Json<ProductPage>> {
    let page = service.page_products(query).await?;
    Ok(Json(page))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created successfully", body = Product),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> ProductResult<impl IntoResponse> {
    let product = service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Update an existing product
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated successfully", body = Product),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(id): Path<i64>,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> ProductResult<Json<Product>> {
    let product = service.update_product(id, input).await?;
    Ok(Json(product))
}

/// Delete a product
///
/// Deleting an id that does not exist still returns 204.
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(id): Path<i64>,
) -> ProductResult<impl IntoResponse> {
    service.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List products in a category (case-insensitive match)
#[utoipa::path(
    get,
    path = "/category/{category}",
    tag = TAG,
    params(
        ("category" = String, Path, description = "Category name, matched ignoring case")
    ),
    responses(
        (status = 200, description = "Products in the category", body = Vec<Product>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn products_by_category<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(category): Path<String>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.products_by_category(&category).await?;
    Ok(Json(products))
}

/// Search products by name fragment (case-insensitive)
#[utoipa::path(
    get,
    path = "/search/{name}",
    tag = TAG,
    params(
        ("name" = String, Path, description = "Name fragment, matched ignoring case")
    ),
    responses(
        (status = 200, description = "Products whose name contains the fragment", body = Vec<Product>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn search_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(name): Path<String>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.search_products(&name).await?;
    Ok(Json(products))
}

/// List products priced at or below a threshold
#[utoipa::path(
    get,
    path = "/price/less-than/{price}",
    tag = TAG,
    params(
        ("price" = f64, Path, description = "Inclusive upper price bound")
    ),
    responses(
        (status = 200, description = "Products at or below the price", body = Vec<Product>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn products_cheaper_than<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(price): Path<f64>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.products_cheaper_than(price).await?;
    Ok(Json(products))
}

/// List products priced at or above a threshold
#[utoipa::path(
    get,
    path = "/price/greater-than/{price}",
    tag = TAG,
    params(
        ("price" = f64, Path, description = "Inclusive lower price bound")
    ),
    responses(
        (status = 200, description = "Products at or above the price", body = Vec<Product>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn products_more_expensive_than<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(price): Path<f64>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.products_more_expensive_than(price).await?;
    Ok(Json(products))
}
