//! Cart API module

mod handler;

use axum::{
    Router,
    routing::{delete, get, put},
};

use crate::core::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/cart", get(handler::list).post(handler::add).delete(handler::clear))
        .route("/api/cart/totals", get(handler::totals))
        .route("/api/cart/quantity", put(handler::set_quantity))
        .route("/api/cart/{product_id}/{size}", delete(handler::remove))
}
