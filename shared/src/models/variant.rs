//! Size Variant Model

use serde::{Deserialize, Serialize};

/// A purchasable size option of a product, with its own price and stock.
///
/// Identity within a product is the label string. Prices are integer
/// currency units; `selling_price <= mrp` is assumed, not enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeVariant {
    /// Free-text size label, e.g. "S", "M", "XL"
    pub label: String,
    /// List price
    pub mrp: i64,
    /// Actual price charged
    pub selling_price: i64,
    /// Units on hand, never negative
    pub stock: i64,
}

/// Sum of stock across variants. Products persist this as `total_stock`;
/// every stock mutation must keep the two in sync.
pub fn total_stock(variants: &[SizeVariant]) -> i64 {
    variants.iter().map(|v| v.stock).sum()
}

/// Lowest selling price across variants, 0 for an empty list.
pub fn min_selling_price(variants: &[SizeVariant]) -> i64 {
    variants.iter().map(|v| v.selling_price).min().unwrap_or(0)
}

/// Lowest mrp across variants, 0 for an empty list.
pub fn min_mrp(variants: &[SizeVariant]) -> i64 {
    variants.iter().map(|v| v.mrp).min().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variants() -> Vec<SizeVariant> {
        vec![
            SizeVariant {
                label: "S".into(),
                mrp: 1000,
                selling_price: 800,
                stock: 3,
            },
            SizeVariant {
                label: "M".into(),
                mrp: 1100,
                selling_price: 750,
                stock: 0,
            },
        ]
    }

    #[test]
    fn stock_and_price_aggregates() {
        let v = variants();
        assert_eq!(total_stock(&v), 3);
        assert_eq!(min_selling_price(&v), 750);
        assert_eq!(min_mrp(&v), 1000);
        assert_eq!(total_stock(&[]), 0);
        assert_eq!(min_selling_price(&[]), 0);
    }
}
