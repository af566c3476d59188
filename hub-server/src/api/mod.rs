//! API route modules
//!
//! # Structure
//!
//! - [`auth`] - registration, login, profile and address book
//! - [`products`] - catalog browsing and admin management
//! - [`reviews`] - product reviews and rating aggregates
//! - [`cart`] - local cart
//! - [`wishlist`] - local wishlist
//! - [`orders`] - checkout and order lifecycle
//! - [`health`] - health check

pub mod auth;
pub mod cart;
pub mod health;
pub mod orders;
pub mod products;
pub mod reviews;
pub mod wishlist;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::AppState;

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(products::router())
        .merge(reviews::router())
        .merge(cart::router())
        .merge(wishlist::router())
        .merge(orders::router())
        .merge(health::router())
}

/// Build the fully configured application with middleware and state.
pub fn build_app(state: AppState) -> Router {
    build_router()
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
