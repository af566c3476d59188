//! Cart Model
//!
//! Cart line items are denormalized snapshots of product + variant taken at
//! add-time. They have no server-side representation until checkout, at
//! which point they are copied verbatim into the order.

use serde::{Deserialize, Serialize};

/// One (product, variant, quantity) entry in the cart.
///
/// Identity is the (product_id, size) pair: adding the same pair again
/// increments quantity instead of duplicating the line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: String,
    pub name: String,
    pub brand: String,
    pub image: String,
    /// Size label of the variant snapshotted into this line
    pub size: String,
    pub mrp: i64,
    pub selling_price: i64,
    pub quantity: i64,
    pub added_at: i64,
}

impl CartLine {
    /// Line identity key
    pub fn matches(&self, product_id: &str, size: &str) -> bool {
        self.product_id == product_id && self.size == size
    }
}

/// Aggregates over the whole cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotals {
    /// Distinct lines
    pub item_count: usize,
    /// Sum of quantities
    pub total_quantity: i64,
    /// Σ mrp · qty
    pub original_total: i64,
    /// Σ selling_price · qty
    pub total: i64,
    /// original_total − total; negative if selling_price > mrp upstream
    pub discount: i64,
    /// round(discount / original_total · 100), 0 for an empty cart
    pub discount_percent: i64,
}

impl CartTotals {
    pub fn compute(lines: &[CartLine]) -> Self {
        let total: i64 = lines.iter().map(|l| l.selling_price * l.quantity).sum();
        let original_total: i64 = lines.iter().map(|l| l.mrp * l.quantity).sum();
        let discount = original_total - total;
        let discount_percent = if original_total > 0 {
            (discount as f64 / original_total as f64 * 100.0).round() as i64
        } else {
            0
        };
        Self {
            item_count: lines.len(),
            total_quantity: lines.iter().map(|l| l.quantity).sum(),
            original_total,
            total,
            discount,
            discount_percent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(product_id: &str, size: &str, mrp: i64, selling: i64, qty: i64) -> CartLine {
        CartLine {
            product_id: product_id.into(),
            name: "Test Tee".into(),
            brand: "Acme".into(),
            image: String::new(),
            size: size.into(),
            mrp,
            selling_price: selling,
            quantity: qty,
            added_at: 0,
        }
    }

    #[test]
    fn totals_identity_holds() {
        let lines = vec![line("p1", "M", 1000, 800, 2), line("p2", "S", 500, 500, 1)];
        let t = CartTotals::compute(&lines);
        assert_eq!(t.item_count, 2);
        assert_eq!(t.total_quantity, 3);
        assert_eq!(t.total, 2100);
        assert_eq!(t.original_total, 2500);
        assert_eq!(t.discount, 400);
        assert_eq!(t.total + t.discount, t.original_total);
        assert_eq!(t.discount_percent, 16);
    }

    #[test]
    fn empty_cart() {
        let t = CartTotals::compute(&[]);
        assert_eq!(t, CartTotals::default());
        assert_eq!(t.discount_percent, 0);
    }

    #[test]
    fn discount_goes_negative_without_crashing() {
        // selling > mrp is not enforced upstream
        let t = CartTotals::compute(&[line("p1", "M", 100, 150, 1)]);
        assert_eq!(t.discount, -50);
        assert_eq!(t.total + t.discount, t.original_total);
        assert_eq!(t.discount_percent, -50);
    }
}
