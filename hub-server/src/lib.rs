//! Fashion Hub Server - storefront backend
//!
//! # Architecture overview
//!
//! - **Document store** (`db`): embedded SurrealDB holding products,
//!   reviews, orders, customer profiles and credentials
//! - **Local state** (`local`): redb-backed cart, wishlist and session cache
//! - **Identity** (`identity`): phone-number identity over argon2 credential
//!   records, JWT session tokens
//! - **Order lifecycle** (`orders`): checkout orchestration, status flow and
//!   the realtime order feed
//! - **HTTP API** (`api`): RESTful surface consumed by the storefront UI
//!
//! # Module structure
//!
//! ```text
//! hub-server/src/
//! ├── core/          # configuration, state, HTTP server
//! ├── common/        # errors, logging
//! ├── db/            # document store models and repositories
//! ├── identity/      # credentials, JWT, profiles, session cache
//! ├── local/         # cart, wishlist, session cache over redb
//! ├── orders/        # checkout service and order event feed
//! └── api/           # HTTP routes and handlers
//! ```

pub mod api;
pub mod common;
pub mod core;
pub mod db;
pub mod identity;
pub mod local;
pub mod orders;

// Re-export common types
pub use common::{AppError, AppResult};
pub use common::logger::init_logger;
pub use core::{AppState, Config, Server};
pub use identity::{CurrentUser, IdentityService, JwtService};
pub use orders::{OrderFeed, OrderService};

/// Set up the process environment: dotenv, then logging.
pub fn setup_environment() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into());
    let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
    let json_format = environment == "production";
    let log_dir = std::env::var("WORK_DIR")
        .ok()
        .map(|dir| format!("{dir}/logs"));

    init_logger(&level, json_format, log_dir.as_deref())
}
