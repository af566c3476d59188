//! Product API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::common::AppResult;
use crate::core::AppState;
use crate::db::models::{Product, ProductCreate, ProductFilter, ProductUpdate};
use crate::identity::AdminUser;

/// GET /api/products - list the catalog, optionally filtered
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<ProductFilter>,
) -> AppResult<Json<Vec<Product>>> {
    let mut products = state.products.find_all().await?;
    products.retain(|p| filter.matches(p));
    Ok(Json(products))
}

/// GET /api/products/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Product>> {
    let product = state.products.find_by_id(&id).await?;
    Ok(Json(product))
}

/// POST /api/products - admin
pub async fn create(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(payload): Json<ProductCreate>,
) -> AppResult<Json<Product>> {
    let product = state.products.create(payload).await?;
    Ok(Json(product))
}

/// PUT /api/products/:id - admin
pub async fn update(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<Product>> {
    let product = state.products.update(&id, payload).await?;
    Ok(Json(product))
}

/// DELETE /api/products/:id - admin, no cascade to reviews
pub async fn delete(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    state.products.delete(&id).await?;
    Ok(Json(true))
}

/// Stock adjustment payload
#[derive(Debug, Deserialize)]
pub struct StockUpdate {
    pub size: String,
    /// Positive to restock, negative to decrement
    pub delta: i64,
}

/// POST /api/products/:id/stock - admin
pub async fn update_stock(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
    Json(payload): Json<StockUpdate>,
) -> AppResult<Json<Product>> {
    let product = state
        .products
        .update_stock(&id, &payload.size, payload.delta)
        .await?;
    Ok(Json(product))
}
