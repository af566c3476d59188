//! Order Model

use serde::{Deserialize, Serialize};
use shared::models::{Address, OrderLine, OrderStatus, PaymentMode};
use surrealdb::RecordId;

use super::serde_helpers;

/// Order entity
///
/// Created once at checkout. Thereafter only `status`, the payment
/// verification fields and `updated_at` mutate; deletion is an explicit
/// admin action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    /// Public id shown to customers, `ORD-<millis>-<rand>`
    pub order_id: String,
    pub customer_id: String,
    pub customer_name: String,
    pub phone: String,
    /// Denormalized copy of the chosen address, not a reference
    pub shipping_address: Address,
    /// Line items copied verbatim from the cart at creation time
    pub items: Vec<OrderLine>,
    /// Σ mrp · qty
    pub original_total: i64,
    /// original_total − total
    pub discount: i64,
    /// Σ selling_price · qty
    pub total: i64,
    pub payment_mode: PaymentMode,
    pub status: OrderStatus,
    #[serde(default)]
    pub tracking_number: String,
    /// Last four digits of the UPI transaction, entered by the customer
    #[serde(default)]
    pub payment_txn_last4: Option<String>,
    #[serde(default)]
    pub payment_verified: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Order {
    /// "table:key" id string, empty before the record is persisted.
    pub fn id_string(&self) -> String {
        self.id.as_ref().map(|id| id.to_string()).unwrap_or_default()
    }
}
