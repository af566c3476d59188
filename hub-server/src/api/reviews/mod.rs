//! Review API module

mod handler;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::core::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        // Public: masked reviews of one product
        .route("/api/products/{id}/reviews", get(handler::list_for_product))
        // Authenticated customer
        .route("/api/reviews", post(handler::add).get(handler::list_all))
        // Admin
        .route("/api/reviews/{id}", delete(handler::delete))
}
