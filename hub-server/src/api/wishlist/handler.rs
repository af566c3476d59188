//! Wishlist API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};

use crate::common::AppResult;
use crate::core::AppState;
use shared::models::WishlistEntry;

/// Add-to-wishlist payload
#[derive(Debug, Deserialize)]
pub struct AddToWishlist {
    pub product_id: String,
}

/// Add outcome: `added` is false when the product was already listed
#[derive(Debug, Serialize)]
pub struct AddResult {
    pub added: bool,
}

/// GET /api/wishlist
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<WishlistEntry>>> {
    Ok(Json(state.wishlist.get_all()?))
}

/// POST /api/wishlist
pub async fn add(
    State(state): State<AppState>,
    Json(payload): Json<AddToWishlist>,
) -> AppResult<Json<AddResult>> {
    let product = state.products.find_by_id(&payload.product_id).await?;
    let added = state.wishlist.add(&product)?;
    Ok(Json(AddResult { added }))
}

/// DELETE /api/wishlist/:product_id
pub async fn remove(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> AppResult<Json<Vec<WishlistEntry>>> {
    Ok(Json(state.wishlist.remove(&product_id)?))
}

/// GET /api/wishlist/count
pub async fn count(State(state): State<AppState>) -> AppResult<Json<usize>> {
    Ok(Json(state.wishlist.count()?))
}

/// DELETE /api/wishlist
pub async fn clear(State(state): State<AppState>) -> AppResult<Json<bool>> {
    state.wishlist.clear()?;
    Ok(Json(true))
}
