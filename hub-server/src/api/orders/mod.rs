//! Order API module

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        // Customer
        .route("/api/orders", post(handler::checkout).get(handler::list_all))
        .route("/api/orders/mine", get(handler::my_orders))
        .route(
            "/api/orders/{id}",
            get(handler::get_by_id).delete(handler::delete),
        )
        .route("/api/orders/{id}/payment", post(handler::confirm_payment))
        // Admin
        .route("/api/orders/{id}/status", put(handler::update_status))
}
