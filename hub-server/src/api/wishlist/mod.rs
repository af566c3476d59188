//! Wishlist API module

mod handler;

use axum::{
    Router,
    routing::{delete, get},
};

use crate::core::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/wishlist",
            get(handler::list).post(handler::add).delete(handler::clear),
        )
        .route("/api/wishlist/count", get(handler::count))
        .route("/api/wishlist/{product_id}", delete(handler::remove))
}
