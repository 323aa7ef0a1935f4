//! Product catalog route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use rust_decimal::Decimal;
use serde::Deserialize;

use fitpass_core::ProductId;

use crate::catalog::filter::{ProductFilter, filter_products};
use crate::error::{AppError, Result};
use crate::models::Product;
use crate::state::AppState;

/// Query parameters for the product listing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
}

impl From<ProductListQuery> for ProductFilter {
    fn from(query: ProductListQuery) -> Self {
        Self {
            search: query.search.unwrap_or_default(),
            category: query.category,
            min_price: query.min_price,
            max_price: query.max_price,
        }
    }
}

/// `GET /api/products`
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> Json<Vec<Product>> {
    let filter = ProductFilter::from(query);
    Json(filter_products(state.catalog().products(), &filter))
}

/// `GET /api/products/{id}`
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>> {
    state
        .catalog()
        .product(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Product".to_string()))
}
