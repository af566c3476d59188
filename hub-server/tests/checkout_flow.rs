//! End-to-end checkout flow over the assembled application state:
//! register, stock the catalog, fill the cart, place the order, then walk
//! the status flow while a realtime feed watches.

use hub_server::core::{AppState, Config};
use hub_server::db::models::ProductCreate;
use hub_server::db::open_memory;
use hub_server::local::LocalStore;
use shared::models::{Address, OrderRef, OrderStatus, PaymentMode, SizeVariant};
use tempfile::TempDir;

async fn state() -> (AppState, TempDir) {
    let dir = TempDir::new().unwrap();
    let config = Config::with_overrides(dir.path().to_string_lossy().to_string(), 0);
    let db = open_memory().await.unwrap();
    let local = LocalStore::open(dir.path().join("local.redb")).unwrap();
    (AppState::assemble(config, db, local), dir)
}

fn address() -> Address {
    Address {
        name: "Ramesh Kumar".into(),
        phone: "9876543210".into(),
        line1: "12 MG Road".into(),
        line2: "Near Gate 2".into(),
        city: "Pune".into(),
        state: "MH".into(),
        pincode: "411001".into(),
    }
}

fn jacket() -> ProductCreate {
    ProductCreate {
        name: "Denim Jacket".into(),
        brand: "Acme".into(),
        category: "jackets".into(),
        barcode: "8901234".into(),
        images: vec!["https://cdn/a.jpg".into()],
        description: "Stone washed".into(),
        variants: vec![
            SizeVariant {
                label: "M".into(),
                mrp: 1000,
                selling_price: 800,
                stock: 4,
            },
            SizeVariant {
                label: "L".into(),
                mrp: 500,
                selling_price: 500,
                stock: 2,
            },
        ],
    }
}

#[tokio::test]
async fn full_checkout_flow() {
    let (state, _dir) = state().await;

    // Register a customer and save a shipping address.
    let registered = state
        .identity
        .register("9876543210", "secret1", "Ramesh")
        .await
        .unwrap();
    let customer_id = registered.profile.id_string();

    let profile = state.identity.add_address(&customer_id, address()).await.unwrap();
    let address_id = profile.addresses.keys().next().unwrap().clone();

    // Stock the catalog and fill the cart.
    let product = state.products.create(jacket()).await.unwrap();
    state.cart.add_line(&product, "M", 2).unwrap();
    state.cart.add_line(&product, "L", 1).unwrap();

    let totals = state.cart.totals().unwrap();
    assert_eq!(totals.total, 2100);
    assert_eq!(totals.original_total, 2500);
    assert_eq!(totals.discount, 400);

    // Watch the customer's orders while checking out.
    let mut feed = state
        .orders
        .subscribe_customer_orders(&customer_id)
        .await
        .unwrap();
    assert!(feed.recv().await.unwrap().is_empty());

    let shipping = profile.addresses[&address_id].clone();
    let lines = state.cart.get_all().unwrap();
    let order = state
        .orders
        .create_order(&registered.profile, lines, shipping, PaymentMode::Cod)
        .await
        .unwrap();
    state.cart.clear().unwrap();

    assert!(order.order_id.starts_with("ORD-"));
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.total, 2100);
    assert_eq!(order.shipping_address.city, "Pune");

    // Stock was decremented per line.
    let after = state.products.find_by_id(&product.id_string()).await.unwrap();
    assert_eq!(after.total_stock, 3);
    let m = after.variants.iter().find(|v| v.label == "M").unwrap();
    assert_eq!(m.stock, 2);
    let l = after.variants.iter().find(|v| v.label == "L").unwrap();
    assert_eq!(l.stock, 1);

    // The cart is empty, the feed saw the order.
    assert!(state.cart.get_all().unwrap().is_empty());
    let delivered = feed.recv().await.unwrap();
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].order_id, order.order_id);

    // Walk the normal status flow.
    let order_ref = OrderRef::parse(&order.order_id);
    for status in [
        OrderStatus::Confirmed,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
    ] {
        let updated = state.orders.update_status(&order_ref, status).await.unwrap();
        assert_eq!(updated.status, status);
        let seen = feed.recv().await.unwrap();
        assert_eq!(seen[0].status, status);
    }

    // The order resolves by public id and shows up in the customer listing.
    let fetched = state.orders.get(&order_ref).await.unwrap();
    assert_eq!(fetched.status, OrderStatus::Delivered);
    let mine = state.orders.customer_orders(&customer_id).await.unwrap();
    assert_eq!(mine.len(), 1);
}

#[tokio::test]
async fn review_cycle_updates_catalog_aggregates() {
    let (state, _dir) = state().await;

    let registered = state
        .identity
        .register("9123456780", "secret1", "Suresh")
        .await
        .unwrap();
    let customer_id = registered.profile.id_string();

    let product = state.products.create(jacket()).await.unwrap();
    let pid = product.id_string();

    let review = state
        .reviews
        .add_rating(
            hub_server::db::models::ReviewCreate {
                product_id: pid.clone(),
                rating: 5,
                text: "Great fit".into(),
                images: vec![],
            },
            &customer_id,
            &registered.profile.name,
            &registered.profile.phone,
        )
        .await
        .unwrap();

    let rated = state.products.find_by_id(&pid).await.unwrap();
    assert_eq!(rated.rating_count, 1);
    assert!((rated.rating - 5.0).abs() < 1e-9);

    state.reviews.delete(&review.id_string()).await.unwrap();
    let unrated = state.products.find_by_id(&pid).await.unwrap();
    assert_eq!(unrated.rating_count, 0);
    assert_eq!(unrated.rating, 0.0);
}
