//! Auth API module

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        // Public routes
        .route("/api/auth/register", post(handler::register))
        .route("/api/auth/login", post(handler::login))
        // Protected routes
        .route("/api/auth/logout", post(handler::logout))
        .route("/api/auth/me", get(handler::me))
        .route("/api/auth/addresses", post(handler::add_address))
        .route(
            "/api/auth/addresses/{id}",
            put(handler::update_address).delete(handler::remove_address),
        )
}
