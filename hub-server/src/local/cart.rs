//! Local Cart Store
//!
//! The persisted list of cart line items. Lines are denormalized snapshots
//! taken at add-time; identity is the (product id, size label) pair. No
//! stock validation happens here: pre-checking stock is the caller's
//! responsibility, checkout is where availability is actually settled.

use crate::common::{AppError, AppResult};
use crate::db::models::Product;
use crate::local::LocalStore;
use crate::local::kv::CART_KEY;
use shared::models::{CartLine, CartTotals};

#[derive(Clone)]
pub struct CartStore {
    store: LocalStore,
}

impl CartStore {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    fn load(&self) -> AppResult<Vec<CartLine>> {
        Ok(self.store.get_json(CART_KEY)?.unwrap_or_default())
    }

    fn save(&self, lines: &[CartLine]) -> AppResult<()> {
        self.store.put_json(CART_KEY, &lines)
    }

    /// Add a variant of a product. An existing (product, size) line has its
    /// quantity incremented; otherwise a new snapshot line is appended.
    pub fn add_line(&self, product: &Product, size_label: &str, qty: i64) -> AppResult<Vec<CartLine>> {
        if qty < 1 {
            return Err(AppError::validation("quantity must be at least 1"));
        }
        let variant = product
            .variants
            .iter()
            .find(|v| v.label == size_label)
            .ok_or_else(|| {
                AppError::not_found(format!("Size {size_label} on product {}", product.id_string()))
            })?;

        let product_id = product.id_string();
        let mut lines = self.load()?;
        match lines.iter_mut().find(|l| l.matches(&product_id, size_label)) {
            Some(line) => line.quantity += qty,
            None => lines.push(CartLine {
                product_id,
                name: product.name.clone(),
                brand: product.brand.clone(),
                image: product.primary_image().to_string(),
                size: variant.label.clone(),
                mrp: variant.mrp,
                selling_price: variant.selling_price,
                quantity: qty,
                added_at: shared::util::now_millis(),
            }),
        }
        self.save(&lines)?;
        Ok(lines)
    }

    /// Drop the matching line, if present.
    pub fn remove_line(&self, product_id: &str, size_label: &str) -> AppResult<Vec<CartLine>> {
        let mut lines = self.load()?;
        lines.retain(|l| !l.matches(product_id, size_label));
        self.save(&lines)?;
        Ok(lines)
    }

    /// Set a line's quantity, clamped to a minimum of 1. Removal is an
    /// explicit operation, never a side effect of setting zero.
    pub fn set_quantity(&self, product_id: &str, size_label: &str, qty: i64) -> AppResult<Vec<CartLine>> {
        let mut lines = self.load()?;
        if let Some(line) = lines.iter_mut().find(|l| l.matches(product_id, size_label)) {
            line.quantity = qty.max(1);
        }
        self.save(&lines)?;
        Ok(lines)
    }

    pub fn get_all(&self) -> AppResult<Vec<CartLine>> {
        self.load()
    }

    pub fn totals(&self) -> AppResult<CartTotals> {
        Ok(CartTotals::compute(&self.load()?))
    }

    pub fn clear(&self) -> AppResult<()> {
        self.store.remove(CART_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::ProductCreate;
    use shared::models::SizeVariant;
    use tempfile::TempDir;

    fn store() -> (CartStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let local = LocalStore::open(dir.path().join("local.redb")).unwrap();
        (CartStore::new(local), dir)
    }

    fn product(id_key: &str) -> Product {
        let mut p = ProductCreate {
            name: "Denim Jacket".into(),
            brand: "Acme".into(),
            category: "jackets".into(),
            barcode: "8901234".into(),
            images: vec!["https://cdn/a.jpg".into()],
            description: String::new(),
            variants: vec![
                SizeVariant {
                    label: "M".into(),
                    mrp: 1000,
                    selling_price: 800,
                    stock: 5,
                },
                SizeVariant {
                    label: "L".into(),
                    mrp: 500,
                    selling_price: 500,
                    stock: 5,
                },
            ],
        }
        .into_product(0);
        p.id = Some(surrealdb::RecordId::from_table_key("product", id_key));
        p
    }

    #[test]
    fn same_pair_merges_into_one_line() {
        let (cart, _dir) = store();
        let p = product("p1");

        cart.add_line(&p, "M", 2).unwrap();
        let lines = cart.add_line(&p, "M", 3).unwrap();

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 5);

        // A different size is a separate line.
        let lines = cart.add_line(&p, "L", 1).unwrap();
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn totals_match_snapshot_prices() {
        let (cart, _dir) = store();
        let p = product("p1");
        cart.add_line(&p, "M", 2).unwrap();
        cart.add_line(&p, "L", 1).unwrap();

        let t = cart.totals().unwrap();
        assert_eq!(t.item_count, 2);
        assert_eq!(t.total_quantity, 3);
        assert_eq!(t.total, 2100);
        assert_eq!(t.original_total, 2500);
        assert_eq!(t.discount, 400);
        assert_eq!(t.total + t.discount, t.original_total);
    }

    #[test]
    fn set_quantity_clamps_to_one() {
        let (cart, _dir) = store();
        let p = product("p1");
        cart.add_line(&p, "M", 2).unwrap();

        let lines = cart.set_quantity("product:p1", "M", 0).unwrap();
        assert_eq!(lines[0].quantity, 1);

        let lines = cart.set_quantity("product:p1", "M", 4).unwrap();
        assert_eq!(lines[0].quantity, 4);
    }

    #[test]
    fn remove_and_clear() {
        let (cart, _dir) = store();
        let p = product("p1");
        cart.add_line(&p, "M", 1).unwrap();
        cart.add_line(&p, "L", 1).unwrap();

        let lines = cart.remove_line("product:p1", "M").unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].size, "L");

        cart.clear().unwrap();
        assert!(cart.get_all().unwrap().is_empty());
        assert_eq!(cart.totals().unwrap(), CartTotals::default());
    }

    #[test]
    fn unknown_size_rejected() {
        let (cart, _dir) = store();
        let p = product("p1");
        let err = cart.add_line(&p, "XXL", 1).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn persists_across_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("local.redb");
        {
            let cart = CartStore::new(LocalStore::open(&path).unwrap());
            cart.add_line(&product("p1"), "M", 2).unwrap();
        }
        let cart = CartStore::new(LocalStore::open(&path).unwrap());
        assert_eq!(cart.get_all().unwrap().len(), 1);
    }
}
