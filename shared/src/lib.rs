//! Shared types for Fashion Hub
//!
//! Store-agnostic domain types used across the workspace: catalog variants,
//! cart and wishlist entries, order line items and status, plus id/time
//! utilities. No I/O lives here.

pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
