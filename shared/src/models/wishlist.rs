//! Wishlist Model

use serde::{Deserialize, Serialize};

use super::variant::{SizeVariant, min_mrp, min_selling_price};

/// A liked product, denormalized at add-time. Identity is `product_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WishlistEntry {
    pub product_id: String,
    pub name: String,
    pub brand: String,
    pub image: String,
    /// Lowest selling price across the product's variants at add-time
    pub min_price: i64,
    /// Lowest mrp across the product's variants at add-time
    pub mrp: i64,
    pub added_at: i64,
}

impl WishlistEntry {
    /// Snapshot a product into a wishlist entry.
    pub fn snapshot(
        product_id: &str,
        name: &str,
        brand: &str,
        image: &str,
        variants: &[SizeVariant],
        added_at: i64,
    ) -> Self {
        Self {
            product_id: product_id.to_string(),
            name: name.to_string(),
            brand: brand.to_string(),
            image: image.to_string(),
            min_price: min_selling_price(variants),
            mrp: min_mrp(variants),
            added_at,
        }
    }
}
