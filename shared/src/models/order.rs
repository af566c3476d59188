//! Order Types
//!
//! Status, payment mode, line items and totals. The order entity itself
//! (with its document-store record id) lives in `hub-server/src/db/models`.

use serde::{Deserialize, Serialize};

use super::cart::CartLine;

/// Order lifecycle status.
///
/// Normal flow is pending → confirmed → shipped → delivered, with cancelled
/// reachable from any non-terminal state. The repository does not enforce
/// transition legality: admin action may write any status over any other.
/// Delivered and cancelled are terminal by UI convention only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMode {
    /// Cash on delivery
    Cod,
    Upi,
}

/// A line item copied verbatim from the cart at checkout.
pub type OrderLine = CartLine;

/// Reference to an order by either of its two identifiers.
///
/// Replaces string-prefix sniffing at call sites: the public
/// `ORD-<millis>-<rand>` id resolves by field query, the internal record id
/// by direct lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderRef {
    ByPublicId(String),
    ByInternalId(String),
}

impl OrderRef {
    /// Classify a raw id string the way the storefront UI hands them over.
    pub fn parse(raw: &str) -> Self {
        if raw.starts_with("ORD-") {
            Self::ByPublicId(raw.to_string())
        } else {
            Self::ByInternalId(raw.to_string())
        }
    }
}

/// Money aggregates for an order. Invariant: `total + discount == original_total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTotals {
    pub original_total: i64,
    pub total: i64,
    pub discount: i64,
}

impl OrderTotals {
    pub fn compute(lines: &[OrderLine]) -> Self {
        let total: i64 = lines.iter().map(|l| l.selling_price * l.quantity).sum();
        let original_total: i64 = lines.iter().map(|l| l.mrp * l.quantity).sum();
        Self {
            original_total,
            total,
            discount: original_total - total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(mrp: i64, selling: i64, qty: i64) -> OrderLine {
        OrderLine {
            product_id: "p1".into(),
            name: "Shirt".into(),
            brand: "Acme".into(),
            image: String::new(),
            size: "M".into(),
            mrp,
            selling_price: selling,
            quantity: qty,
            added_at: 0,
        }
    }

    #[test]
    fn totals_from_lines() {
        let t = OrderTotals::compute(&[line(1000, 800, 2), line(500, 500, 1)]);
        assert_eq!(t.total, 2100);
        assert_eq!(t.original_total, 2500);
        assert_eq!(t.discount, 400);
        assert_eq!(t.total + t.discount, t.original_total);
    }

    #[test]
    fn order_ref_classification() {
        assert_eq!(
            OrderRef::parse("ORD-1700000000000-a1b2c3d4e"),
            OrderRef::ByPublicId("ORD-1700000000000-a1b2c3d4e".into())
        );
        assert_eq!(
            OrderRef::parse("k3jf29sd"),
            OrderRef::ByInternalId("k3jf29sd".into())
        );
    }

    #[test]
    fn status_serde_rejects_unknown() {
        assert_eq!(
            serde_json::from_str::<OrderStatus>("\"shipped\"").unwrap(),
            OrderStatus::Shipped
        );
        assert!(serde_json::from_str::<OrderStatus>("\"returned\"").is_err());
    }
}
