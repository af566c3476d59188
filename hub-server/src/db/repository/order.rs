//! Order Repository
//!
//! Document CRUD for orders. Orders resolve by either identifier through
//! [`OrderRef`]: the public `ORD-…` id by field query (logically unique by
//! construction), the internal record id by direct lookup.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, record_id};
use crate::common::{AppError, AppResult};
use crate::db::models::Order;
use shared::models::{OrderRef, OrderStatus};

const ORDER_TABLE: &str = "order";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Persist a new order document. This is the only write in checkout
    /// whose failure aborts the whole operation.
    pub async fn create(&self, order: Order) -> AppResult<Order> {
        let created: Option<Order> = self
            .base
            .db()
            .create(ORDER_TABLE)
            .content(order)
            .await
            .map_err(|e| AppError::order_creation(e.to_string()))?;
        created.ok_or_else(|| AppError::order_creation("order document write returned nothing"))
    }

    /// Resolve an order by either identifier.
    pub async fn resolve(&self, order_ref: &OrderRef) -> AppResult<Order> {
        let order = match order_ref {
            OrderRef::ByPublicId(public_id) => {
                let mut result = self
                    .base
                    .db()
                    .query("SELECT * FROM order WHERE order_id = $oid LIMIT 1")
                    .bind(("oid", public_id.clone()))
                    .await?;
                let orders: Vec<Order> = result.take(0)?;
                orders.into_iter().next()
            }
            OrderRef::ByInternalId(internal_id) => {
                self.base
                    .db()
                    .select(record_id(ORDER_TABLE, internal_id))
                    .await?
            }
        };

        order.ok_or_else(|| match order_ref {
            OrderRef::ByPublicId(id) | OrderRef::ByInternalId(id) => {
                AppError::not_found(format!("Order {id}"))
            }
        })
    }

    /// Write a new status unconditionally. No transition legality is
    /// enforced; repeating the same status only advances `updated_at`.
    pub async fn update_status(
        &self,
        order_ref: &OrderRef,
        status: OrderStatus,
    ) -> AppResult<Order> {
        let order = self.resolve(order_ref).await?;
        let thing = record_id(ORDER_TABLE, &order.id_string());

        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET status = $status, updated_at = $now RETURN AFTER")
            .bind(("thing", thing))
            .bind(("status", status))
            .bind(("now", shared::util::now_millis()))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        orders
            .into_iter()
            .next()
            .ok_or_else(|| AppError::not_found(format!("Order {}", order.order_id)))
    }

    /// Record the customer's UPI payment confirmation.
    pub async fn confirm_payment(&self, order_ref: &OrderRef, txn_last4: &str) -> AppResult<Order> {
        if txn_last4.len() != 4 || !txn_last4.chars().all(|c| c.is_ascii_digit()) {
            return Err(AppError::validation(
                "transaction reference must be exactly 4 digits",
            ));
        }

        let order = self.resolve(order_ref).await?;
        let thing = record_id(ORDER_TABLE, &order.id_string());

        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $thing SET payment_txn_last4 = $last4, payment_verified = true, \
                 updated_at = $now RETURN AFTER",
            )
            .bind(("thing", thing))
            .bind(("last4", txn_last4.to_string()))
            .bind(("now", shared::util::now_millis()))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        orders
            .into_iter()
            .next()
            .ok_or_else(|| AppError::not_found(format!("Order {}", order.order_id)))
    }

    /// One customer's orders, newest first.
    pub async fn find_by_customer(&self, customer_id: &str) -> AppResult<Vec<Order>> {
        let mut orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM order WHERE customer_id = $cid")
            .bind(("cid", customer_id.to_string()))
            .await?
            .take(0)?;
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    /// All orders, newest first.
    pub async fn find_all(&self) -> AppResult<Vec<Order>> {
        let mut orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM order")
            .await?
            .take(0)?;
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    /// Hard delete.
    pub async fn delete(&self, order_ref: &OrderRef) -> AppResult<()> {
        let order = self.resolve(order_ref).await?;
        let _: Option<Order> = self
            .base
            .db()
            .delete(record_id(ORDER_TABLE, &order.id_string()))
            .await?;
        Ok(())
    }
}
