//! Cart API Handlers
//!
//! The cart itself is synchronous local state; the add path goes through
//! the catalog to snapshot the variant's current prices into the line.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use crate::common::AppResult;
use crate::core::AppState;
use shared::models::{CartLine, CartTotals};

fn default_qty() -> i64 {
    1
}

/// Add-to-cart payload
#[derive(Debug, Deserialize)]
pub struct AddToCart {
    pub product_id: String,
    pub size: String,
    #[serde(default = "default_qty")]
    pub quantity: i64,
}

/// Quantity update payload
#[derive(Debug, Deserialize)]
pub struct SetQuantity {
    pub product_id: String,
    pub size: String,
    pub quantity: i64,
}

/// GET /api/cart
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<CartLine>>> {
    Ok(Json(state.cart.get_all()?))
}

/// POST /api/cart
pub async fn add(
    State(state): State<AppState>,
    Json(payload): Json<AddToCart>,
) -> AppResult<Json<Vec<CartLine>>> {
    let product = state.products.find_by_id(&payload.product_id).await?;
    let lines = state.cart.add_line(&product, &payload.size, payload.quantity)?;
    Ok(Json(lines))
}

/// PUT /api/cart/quantity - clamped to a minimum of 1
pub async fn set_quantity(
    State(state): State<AppState>,
    Json(payload): Json<SetQuantity>,
) -> AppResult<Json<Vec<CartLine>>> {
    let lines = state
        .cart
        .set_quantity(&payload.product_id, &payload.size, payload.quantity)?;
    Ok(Json(lines))
}

/// DELETE /api/cart/:product_id/:size
pub async fn remove(
    State(state): State<AppState>,
    Path((product_id, size)): Path<(String, String)>,
) -> AppResult<Json<Vec<CartLine>>> {
    Ok(Json(state.cart.remove_line(&product_id, &size)?))
}

/// GET /api/cart/totals
pub async fn totals(State(state): State<AppState>) -> AppResult<Json<CartTotals>> {
    Ok(Json(state.cart.totals()?))
}

/// DELETE /api/cart
pub async fn clear(State(state): State<AppState>) -> AppResult<Json<bool>> {
    state.cart.clear()?;
    Ok(Json(true))
}
