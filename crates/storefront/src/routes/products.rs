//! Catalog route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use moto_shop_core::{Category, CategoryId, Product, ProductId};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Product listing filters.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Case-insensitive text search over name and description.
    pub q: Option<String>,
    /// Category id filter.
    pub category: Option<String>,
}

/// Product card data for listings.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub id: ProductId,
    pub name: String,
    pub price: String,
    pub category: CategoryId,
    pub image: Option<String>,
    pub rating: f32,
    pub review_count: u32,
    pub in_stock: bool,
}

impl From<&Product> for ProductSummary {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price.display(),
            category: product.category.clone(),
            image: product.images.first().cloned(),
            rating: product.rating,
            review_count: product.review_count,
            in_stock: product.in_stock,
        }
    }
}

/// Product listing response.
#[derive(Debug, Serialize)]
pub struct ProductList {
    pub products: Vec<ProductSummary>,
    pub total: usize,
}

/// Product detail response: the full record plus a formatted price.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub display_price: String,
}

/// List products, optionally filtered by text query and category.
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Json<ProductList> {
    let category = query.category.map(CategoryId::new);
    let hits = state
        .catalog()
        .search(query.q.as_deref(), category.as_ref());
    let products: Vec<ProductSummary> = hits.into_iter().map(ProductSummary::from).collect();
    let total = products.len();
    Json(ProductList { products, total })
}

/// Fetch a product by id.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductDetail>> {
    let product = state
        .catalog()
        .product(&ProductId::new(id))
        .ok_or_else(|| AppError::NotFound("product".to_string()))?
        .clone();
    let display_price = product.price.display();
    Ok(Json(ProductDetail {
        product,
        display_price,
    }))
}

/// List the sidebar categories.
pub async fn categories(State(state): State<AppState>) -> Json<Vec<Category>> {
    Json(state.catalog().categories().to_vec())
}
