//! Local persistent state
//!
//! The storefront's browser-local storage rendered as redb tables: the
//! cart, the wishlist and the session cache. One store per install,
//! mutated synchronously, persisted immediately on every call.

pub mod cart;
pub mod kv;
pub mod session;
pub mod wishlist;

pub use cart::CartStore;
pub use kv::LocalStore;
pub use session::SessionCache;
pub use wishlist::WishlistStore;
