//! Order Service
//!
//! Checkout orchestration and the consumer-facing order operations. Order
//! creation and the per-line stock decrements are deliberately NOT atomic
//! as a whole: the order document write is the only aborting failure, each
//! decrement afterwards is independent and best-effort. Decrement failures
//! (insufficient stock included) are logged and skipped, never rolled back.

use tokio::sync::mpsc;

use crate::common::{AppError, AppResult};
use crate::db::models::{CustomerProfile, Order};
use crate::db::repository::{OrderRepository, ProductRepository};
use crate::orders::events::{OrderEvent, OrderEvents, OrderFeed};
use shared::models::{Address, OrderLine, OrderRef, OrderStatus, OrderTotals, PaymentMode};

const FEED_BUFFER: usize = 16;

#[derive(Clone)]
pub struct OrderService {
    orders: OrderRepository,
    products: ProductRepository,
    events: OrderEvents,
}

impl OrderService {
    pub fn new(orders: OrderRepository, products: ProductRepository, events: OrderEvents) -> Self {
        Self {
            orders,
            products,
            events,
        }
    }

    /// Place an order from the given cart lines.
    ///
    /// 1. Totals are computed from the snapshot prices in the lines.
    /// 2. The order document is written with status `pending`; this is the
    ///    only failure that aborts the call.
    /// 3. Stock is decremented per line, sequentially, best-effort.
    pub async fn create_order(
        &self,
        customer: &CustomerProfile,
        lines: Vec<OrderLine>,
        shipping_address: Address,
        payment_mode: PaymentMode,
    ) -> AppResult<Order> {
        if lines.is_empty() {
            return Err(AppError::validation("cart is empty"));
        }
        if lines.iter().any(|l| l.quantity < 1) {
            return Err(AppError::validation("line quantities must be at least 1"));
        }

        let totals = OrderTotals::compute(&lines);
        let now = shared::util::now_millis();
        let order = Order {
            id: None,
            order_id: shared::util::order_public_id(),
            customer_id: customer.id_string(),
            customer_name: customer.name.clone(),
            phone: customer.phone.clone(),
            shipping_address,
            items: lines,
            original_total: totals.original_total,
            discount: totals.discount,
            total: totals.total,
            payment_mode,
            status: OrderStatus::Pending,
            tracking_number: String::new(),
            payment_txn_last4: None,
            payment_verified: false,
            created_at: now,
            updated_at: now,
        };

        let created = self.orders.create(order).await?;
        tracing::info!(order_id = %created.order_id, total = created.total, "order created");

        // Best-effort decrement fan-out. One line at a time; a failed line
        // leaves the order and the other lines' decrements in place.
        for line in &created.items {
            match self
                .products
                .update_stock(&line.product_id, &line.size, -line.quantity)
                .await
            {
                Ok(_) => tracing::debug!(
                    order_id = %created.order_id,
                    product_id = %line.product_id,
                    size = %line.size,
                    qty = line.quantity,
                    "stock decremented"
                ),
                Err(e) => tracing::warn!(
                    order_id = %created.order_id,
                    product_id = %line.product_id,
                    size = %line.size,
                    error = %e,
                    "stock decrement skipped"
                ),
            }
        }

        self.events.publish(OrderEvent::Created {
            customer_id: created.customer_id.clone(),
            order_id: created.order_id.clone(),
        });

        Ok(created)
    }

    /// Look up an order by either identifier.
    pub async fn get(&self, order_ref: &OrderRef) -> AppResult<Order> {
        self.orders.resolve(order_ref).await
    }

    /// Write a new status. Idempotent with respect to the status value;
    /// repeating a status only advances `updated_at`.
    pub async fn update_status(
        &self,
        order_ref: &OrderRef,
        status: OrderStatus,
    ) -> AppResult<Order> {
        let updated = self.orders.update_status(order_ref, status).await?;
        tracing::info!(order_id = %updated.order_id, status = %status, "order status updated");
        self.events.publish(OrderEvent::StatusChanged {
            customer_id: updated.customer_id.clone(),
            order_id: updated.order_id.clone(),
            status,
        });
        Ok(updated)
    }

    /// Record the customer's UPI payment confirmation.
    pub async fn confirm_payment(&self, order_ref: &OrderRef, txn_last4: &str) -> AppResult<Order> {
        let updated = self.orders.confirm_payment(order_ref, txn_last4).await?;
        self.events.publish(OrderEvent::PaymentConfirmed {
            customer_id: updated.customer_id.clone(),
            order_id: updated.order_id.clone(),
        });
        Ok(updated)
    }

    /// One customer's orders, newest first.
    pub async fn customer_orders(&self, customer_id: &str) -> AppResult<Vec<Order>> {
        self.orders.find_by_customer(customer_id).await
    }

    /// All orders, newest first.
    pub async fn all_orders(&self) -> AppResult<Vec<Order>> {
        self.orders.find_all().await
    }

    /// Hard delete.
    pub async fn delete_order(&self, order_ref: &OrderRef) -> AppResult<()> {
        let order = self.orders.resolve(order_ref).await?;
        self.orders.delete(order_ref).await?;
        self.events.publish(OrderEvent::Deleted {
            customer_id: order.customer_id,
            order_id: order.order_id,
        });
        Ok(())
    }

    /// Subscribe to one customer's orders. Delivers an initial snapshot,
    /// then the re-sorted list after every mutation of that customer's
    /// orders. The returned handle owns the subscription; dropping it (or
    /// calling `unsubscribe`) releases it. Establishing a replacement feed
    /// is done by dropping the previous handle.
    pub async fn subscribe_customer_orders(&self, customer_id: &str) -> AppResult<OrderFeed> {
        let (tx, rx) = mpsc::channel(FEED_BUFFER);

        let initial = self.customer_orders(customer_id).await?;
        // Buffer is empty here, the initial snapshot always fits.
        let _ = tx.try_send(initial);

        let mut events = self.events.subscribe();
        let orders = self.orders.clone();
        let customer_id = customer_id.to_string();

        let task = tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(event) if event.customer_id() == customer_id => {
                        match orders.find_by_customer(&customer_id).await {
                            Ok(list) => {
                                if tx.send(list).await.is_err() {
                                    break;
                                }
                            }
                            Err(e) => {
                                tracing::warn!(error = %e, "order feed refresh failed");
                            }
                        }
                    }
                    Ok(_) => {}
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "order feed lagged, resyncing");
                        match orders.find_by_customer(&customer_id).await {
                            Ok(list) => {
                                if tx.send(list).await.is_err() {
                                    break;
                                }
                            }
                            Err(e) => tracing::warn!(error = %e, "order feed resync failed"),
                        }
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                }
            }
        });

        Ok(OrderFeed::new(rx, task))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::ProductCreate;
    use crate::db::open_memory;
    use crate::db::repository::{OrderRepository, ProductRepository};
    use shared::models::SizeVariant;
    use std::collections::BTreeMap;

    async fn setup() -> (OrderService, ProductRepository) {
        let db = open_memory().await.unwrap();
        let products = ProductRepository::new(db.clone());
        let service = OrderService::new(
            OrderRepository::new(db),
            products.clone(),
            OrderEvents::new(),
        );
        (service, products)
    }

    fn customer() -> CustomerProfile {
        CustomerProfile {
            id: Some(surrealdb::RecordId::from_table_key("user", "c1")),
            phone: "9876543210".into(),
            name: "Ramesh".into(),
            email: "9876543210@rvfashion.local".into(),
            is_admin: false,
            addresses: BTreeMap::new(),
            created_at: 0,
        }
    }

    fn address() -> Address {
        Address {
            name: "Ramesh Kumar".into(),
            phone: "9876543210".into(),
            line1: "12 MG Road".into(),
            line2: String::new(),
            city: "Pune".into(),
            state: "MH".into(),
            pincode: "411001".into(),
        }
    }

    async fn seed_product(
        products: &ProductRepository,
        name: &str,
        mrp: i64,
        selling: i64,
        stock: i64,
    ) -> crate::db::models::Product {
        products
            .create(ProductCreate {
                name: name.into(),
                brand: "Acme".into(),
                category: "shirts".into(),
                barcode: format!("bar-{name}"),
                images: vec![],
                description: String::new(),
                variants: vec![SizeVariant {
                    label: "M".into(),
                    mrp,
                    selling_price: selling,
                    stock,
                }],
            })
            .await
            .unwrap()
    }

    fn line_for(product: &crate::db::models::Product, qty: i64) -> OrderLine {
        let v = &product.variants[0];
        OrderLine {
            product_id: product.id_string(),
            name: product.name.clone(),
            brand: product.brand.clone(),
            image: String::new(),
            size: v.label.clone(),
            mrp: v.mrp,
            selling_price: v.selling_price,
            quantity: qty,
            added_at: 0,
        }
    }

    #[tokio::test]
    async fn totals_and_public_id() {
        let (service, products) = setup().await;
        let p1 = seed_product(&products, "A", 1000, 800, 10).await;
        let p2 = seed_product(&products, "B", 500, 500, 10).await;

        let order = service
            .create_order(
                &customer(),
                vec![line_for(&p1, 2), line_for(&p2, 1)],
                address(),
                PaymentMode::Cod,
            )
            .await
            .unwrap();

        assert_eq!(order.total, 2100);
        assert_eq!(order.original_total, 2500);
        assert_eq!(order.discount, 400);
        assert_eq!(order.total + order.discount, order.original_total);
        assert!(order.order_id.starts_with("ORD-"));
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[tokio::test]
    async fn stock_decremented_per_line() {
        let (service, products) = setup().await;
        let p = seed_product(&products, "A", 1000, 800, 5).await;

        service
            .create_order(&customer(), vec![line_for(&p, 3)], address(), PaymentMode::Cod)
            .await
            .unwrap();

        let after = products.find_by_id(&p.id_string()).await.unwrap();
        assert_eq!(after.variants[0].stock, 2);
        assert_eq!(after.total_stock, 2);
    }

    #[tokio::test]
    async fn insufficient_line_does_not_roll_back() {
        let (service, products) = setup().await;
        let p_ok = seed_product(&products, "A", 1000, 800, 5).await;
        let p_short = seed_product(&products, "B", 500, 500, 1).await;

        // Second line oversells; the order still goes through and the first
        // line's decrement stands.
        let order = service
            .create_order(
                &customer(),
                vec![line_for(&p_ok, 2), line_for(&p_short, 3)],
                address(),
                PaymentMode::Cod,
            )
            .await
            .unwrap();
        assert_eq!(order.items.len(), 2);

        let ok_after = products.find_by_id(&p_ok.id_string()).await.unwrap();
        assert_eq!(ok_after.variants[0].stock, 3);

        let short_after = products.find_by_id(&p_short.id_string()).await.unwrap();
        assert_eq!(short_after.variants[0].stock, 1);
    }

    #[tokio::test]
    async fn empty_cart_rejected() {
        let (service, _) = setup().await;
        let err = service
            .create_order(&customer(), vec![], address(), PaymentMode::Cod)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn resolve_by_both_ids() {
        let (service, products) = setup().await;
        let p = seed_product(&products, "A", 1000, 800, 5).await;
        let created = service
            .create_order(&customer(), vec![line_for(&p, 1)], address(), PaymentMode::Cod)
            .await
            .unwrap();

        let by_public = service
            .get(&OrderRef::parse(&created.order_id))
            .await
            .unwrap();
        assert_eq!(by_public.order_id, created.order_id);

        let by_internal = service
            .get(&OrderRef::parse(&created.id_string()))
            .await
            .unwrap();
        assert_eq!(by_internal.order_id, created.order_id);

        let err = service
            .get(&OrderRef::parse("ORD-0-notreally1"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn status_update_is_idempotent() {
        let (service, products) = setup().await;
        let p = seed_product(&products, "A", 1000, 800, 5).await;
        let created = service
            .create_order(&customer(), vec![line_for(&p, 1)], address(), PaymentMode::Cod)
            .await
            .unwrap();
        let order_ref = OrderRef::parse(&created.order_id);

        let first = service
            .update_status(&order_ref, OrderStatus::Confirmed)
            .await
            .unwrap();
        assert_eq!(first.status, OrderStatus::Confirmed);

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        let second = service
            .update_status(&order_ref, OrderStatus::Confirmed)
            .await
            .unwrap();
        assert_eq!(second.status, OrderStatus::Confirmed);
        assert!(second.updated_at > first.updated_at);
    }

    #[tokio::test]
    async fn payment_confirmation() {
        let (service, products) = setup().await;
        let p = seed_product(&products, "A", 1000, 800, 5).await;
        let created = service
            .create_order(&customer(), vec![line_for(&p, 1)], address(), PaymentMode::Upi)
            .await
            .unwrap();
        let order_ref = OrderRef::parse(&created.order_id);

        let err = service.confirm_payment(&order_ref, "12a4").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let confirmed = service.confirm_payment(&order_ref, "1234").await.unwrap();
        assert_eq!(confirmed.payment_txn_last4.as_deref(), Some("1234"));
        assert!(confirmed.payment_verified);
    }

    #[tokio::test]
    async fn delete_then_resolve_is_not_found() {
        let (service, products) = setup().await;
        let p = seed_product(&products, "A", 1000, 800, 5).await;
        let created = service
            .create_order(&customer(), vec![line_for(&p, 1)], address(), PaymentMode::Cod)
            .await
            .unwrap();
        let order_ref = OrderRef::parse(&created.order_id);

        service.delete_order(&order_ref).await.unwrap();
        assert!(matches!(
            service.get(&order_ref).await.unwrap_err(),
            AppError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn feed_delivers_snapshot_then_updates() {
        let (service, products) = setup().await;
        let p = seed_product(&products, "A", 1000, 800, 10).await;
        let customer = customer();

        let mut feed = service
            .subscribe_customer_orders(&customer.id_string())
            .await
            .unwrap();

        // Initial snapshot is empty.
        let initial = feed.recv().await.unwrap();
        assert!(initial.is_empty());

        let created = service
            .create_order(&customer, vec![line_for(&p, 1)], address(), PaymentMode::Cod)
            .await
            .unwrap();

        let after_create = feed.recv().await.unwrap();
        assert_eq!(after_create.len(), 1);
        assert_eq!(after_create[0].order_id, created.order_id);

        service
            .update_status(&OrderRef::parse(&created.order_id), OrderStatus::Shipped)
            .await
            .unwrap();
        let after_status = feed.recv().await.unwrap();
        assert_eq!(after_status[0].status, OrderStatus::Shipped);

        // Release is idempotent; a released feed yields nothing further.
        feed.unsubscribe();
        feed.unsubscribe();
        assert!(feed.recv().await.is_none());
    }

    #[tokio::test]
    async fn feed_ignores_other_customers() {
        let (service, products) = setup().await;
        let p = seed_product(&products, "A", 1000, 800, 10).await;

        let mine = customer();
        let mut other = customer();
        other.id = Some(surrealdb::RecordId::from_table_key("user", "c2"));

        let mut feed = service
            .subscribe_customer_orders(&mine.id_string())
            .await
            .unwrap();
        assert!(feed.recv().await.unwrap().is_empty());

        service
            .create_order(&other, vec![line_for(&p, 1)], address(), PaymentMode::Cod)
            .await
            .unwrap();
        service
            .create_order(&mine, vec![line_for(&p, 1)], address(), PaymentMode::Cod)
            .await
            .unwrap();

        // Only the second order (ours) produces a delivery.
        let delivered = feed.recv().await.unwrap();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].customer_id, mine.id_string());
    }
}
