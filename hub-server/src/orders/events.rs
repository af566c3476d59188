//! Order event hub
//!
//! Broadcast channel carrying order mutations so customer-facing views can
//! keep their order lists current. [`OrderFeed`] is the owned subscription
//! handle: dropping it releases the feed, and release is idempotent.

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use crate::db::models::Order;
use shared::models::OrderStatus;

const CHANNEL_CAPACITY: usize = 256;

/// A mutation of some order, tagged with the owning customer.
#[derive(Debug, Clone)]
pub enum OrderEvent {
    Created {
        customer_id: String,
        order_id: String,
    },
    StatusChanged {
        customer_id: String,
        order_id: String,
        status: OrderStatus,
    },
    PaymentConfirmed {
        customer_id: String,
        order_id: String,
    },
    Deleted {
        customer_id: String,
        order_id: String,
    },
}

impl OrderEvent {
    pub fn customer_id(&self) -> &str {
        match self {
            Self::Created { customer_id, .. }
            | Self::StatusChanged { customer_id, .. }
            | Self::PaymentConfirmed { customer_id, .. }
            | Self::Deleted { customer_id, .. } => customer_id,
        }
    }
}

/// The hub all order mutations are published through.
#[derive(Clone, Debug)]
pub struct OrderEvents {
    tx: broadcast::Sender<OrderEvent>,
}

impl OrderEvents {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Publish an event. A hub without live subscribers swallows it.
    pub fn publish(&self, event: OrderEvent) {
        let _ = self.tx.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<OrderEvent> {
        self.tx.subscribe()
    }
}

impl Default for OrderEvents {
    fn default() -> Self {
        Self::new()
    }
}

/// An owned realtime subscription to one customer's orders.
///
/// Each relevant mutation re-delivers the customer's full order list,
/// newest first, starting with an initial snapshot. The feed task is
/// aborted on drop; nothing outlives the handle.
#[derive(Debug)]
pub struct OrderFeed {
    rx: mpsc::Receiver<Vec<Order>>,
    task: JoinHandle<()>,
}

impl OrderFeed {
    pub(crate) fn new(rx: mpsc::Receiver<Vec<Order>>, task: JoinHandle<()>) -> Self {
        Self { rx, task }
    }

    /// Next delivery of the order list. `None` once the feed has been
    /// released or the hub has shut down.
    pub async fn recv(&mut self) -> Option<Vec<Order>> {
        self.rx.recv().await
    }

    /// Release the subscription. Safe to call repeatedly.
    pub fn unsubscribe(&mut self) {
        self.task.abort();
        self.rx.close();
    }
}

impl Drop for OrderFeed {
    fn drop(&mut self) {
        self.task.abort();
    }
}
