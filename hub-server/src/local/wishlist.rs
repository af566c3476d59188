//! Local Wishlist Store

use crate::common::AppResult;
use crate::db::models::Product;
use crate::local::LocalStore;
use crate::local::kv::WISHLIST_KEY;
use shared::models::WishlistEntry;

#[derive(Clone)]
pub struct WishlistStore {
    store: LocalStore,
}

impl WishlistStore {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    fn load(&self) -> AppResult<Vec<WishlistEntry>> {
        Ok(self.store.get_json(WISHLIST_KEY)?.unwrap_or_default())
    }

    /// Add a product. Idempotent: returns false if it is already listed.
    pub fn add(&self, product: &Product) -> AppResult<bool> {
        let product_id = product.id_string();
        let mut entries = self.load()?;
        if entries.iter().any(|e| e.product_id == product_id) {
            return Ok(false);
        }
        entries.push(WishlistEntry::snapshot(
            &product_id,
            &product.name,
            &product.brand,
            product.primary_image(),
            &product.variants,
            shared::util::now_millis(),
        ));
        self.store.put_json(WISHLIST_KEY, &entries)?;
        Ok(true)
    }

    pub fn remove(&self, product_id: &str) -> AppResult<Vec<WishlistEntry>> {
        let mut entries = self.load()?;
        entries.retain(|e| e.product_id != product_id);
        self.store.put_json(WISHLIST_KEY, &entries)?;
        Ok(entries)
    }

    pub fn contains(&self, product_id: &str) -> AppResult<bool> {
        Ok(self.load()?.iter().any(|e| e.product_id == product_id))
    }

    pub fn count(&self) -> AppResult<usize> {
        Ok(self.load()?.len())
    }

    pub fn get_all(&self) -> AppResult<Vec<WishlistEntry>> {
        self.load()
    }

    pub fn clear(&self) -> AppResult<()> {
        self.store.remove(WISHLIST_KEY)
    }
}
