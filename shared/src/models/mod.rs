//! Data models
//!
//! Store-agnostic domain types shared between the server crate and any
//! client. Entity types that carry document-store record ids live in
//! `hub-server/src/db/models`.

pub mod cart;
pub mod customer;
pub mod order;
pub mod variant;
pub mod wishlist;

// Re-exports
pub use cart::*;
pub use customer::*;
pub use order::*;
pub use variant::*;
pub use wishlist::*;
