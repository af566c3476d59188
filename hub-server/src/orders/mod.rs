//! Order lifecycle
//!
//! Checkout orchestration over the order and product repositories, plus the
//! in-process event hub feeding realtime order subscriptions.

pub mod events;
pub mod service;

pub use events::{OrderEvent, OrderEvents, OrderFeed};
pub use service::OrderService;
