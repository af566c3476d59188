//! Product Repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, record_id};
use crate::common::{AppError, AppResult};
use crate::db::models::{Product, ProductCreate, ProductUpdate};
use shared::models::total_stock;

const PRODUCT_TABLE: &str = "product";

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Create a new product. Rating starts at zero; the first image is
    /// mirrored into the legacy single-image field.
    pub async fn create(&self, data: ProductCreate) -> AppResult<Product> {
        if data.name.trim().is_empty()
            || data.brand.trim().is_empty()
            || data.category.trim().is_empty()
            || data.barcode.trim().is_empty()
        {
            return Err(AppError::validation(
                "name, brand, category and barcode are required",
            ));
        }
        if data.variants.is_empty() {
            return Err(AppError::validation("at least one size variant is required"));
        }
        if data.variants.iter().any(|v| v.label.trim().is_empty()) {
            return Err(AppError::validation("size labels cannot be empty"));
        }
        if data.variants.iter().any(|v| v.stock < 0) {
            return Err(AppError::validation("variant stock cannot be negative"));
        }

        let product = data.into_product(shared::util::now_millis());
        let created: Option<Product> = self
            .base
            .db()
            .create(PRODUCT_TABLE)
            .content(product)
            .await?;

        created.ok_or_else(|| AppError::remote("failed to create product"))
    }

    /// All products, newest first.
    pub async fn find_all(&self) -> AppResult<Vec<Product>> {
        let products: Vec<Product> = self
            .base
            .db()
            .query("SELECT * FROM product ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(products)
    }

    /// Find product by id.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Product> {
        let product: Option<Product> =
            self.base.db().select(record_id(PRODUCT_TABLE, id)).await?;
        product.ok_or_else(|| AppError::not_found(format!("Product {id}")))
    }

    /// Update a product. Replacing the variant list recomputes `total_stock`
    /// and a new image list re-mirrors the legacy field.
    pub async fn update(&self, id: &str, data: ProductUpdate) -> AppResult<Product> {
        let thing = record_id(PRODUCT_TABLE, id);

        let mut set_parts: Vec<&str> = Vec::new();
        if data.name.is_some() {
            set_parts.push("name = $name");
        }
        if data.brand.is_some() {
            set_parts.push("brand = $brand");
        }
        if data.category.is_some() {
            set_parts.push("category = $category");
        }
        if data.barcode.is_some() {
            set_parts.push("barcode = $barcode");
        }
        if data.images.is_some() {
            set_parts.push("images = $images");
            set_parts.push("image = $image");
        }
        if data.description.is_some() {
            set_parts.push("description = $description");
        }
        if data.variants.is_some() {
            set_parts.push("variants = $variants");
            set_parts.push("total_stock = $total_stock");
        }

        if set_parts.is_empty() {
            return self.find_by_id(id).await;
        }
        set_parts.push("updated_at = $now");

        let query_str = format!("UPDATE $thing SET {} RETURN AFTER", set_parts.join(", "));

        let mut query = self
            .base
            .db()
            .query(query_str)
            .bind(("thing", thing))
            .bind(("now", shared::util::now_millis()));

        if let Some(v) = data.name {
            query = query.bind(("name", v));
        }
        if let Some(v) = data.brand {
            query = query.bind(("brand", v));
        }
        if let Some(v) = data.category {
            query = query.bind(("category", v));
        }
        if let Some(v) = data.barcode {
            query = query.bind(("barcode", v));
        }
        if let Some(v) = data.images {
            let image = v.first().cloned().unwrap_or_default();
            query = query.bind(("images", v)).bind(("image", image));
        }
        if let Some(v) = data.description {
            query = query.bind(("description", v));
        }
        if let Some(v) = data.variants {
            let total = total_stock(&v);
            query = query.bind(("variants", v)).bind(("total_stock", total));
        }

        let mut result = query.await?;
        let products: Vec<Product> = result.take(0)?;
        products
            .into_iter()
            .next()
            .ok_or_else(|| AppError::not_found(format!("Product {id}")))
    }

    /// Adjust one variant's stock by `delta` (negative to decrement).
    ///
    /// The precondition `stock + delta >= 0` travels inside the UPDATE's
    /// WHERE clause, so concurrent decrements of the last unit cannot both
    /// succeed; `total_stock` moves by the same delta in the same statement.
    pub async fn update_stock(
        &self,
        id: &str,
        size_label: &str,
        delta: i64,
    ) -> AppResult<Product> {
        let product = self.find_by_id(id).await?;
        let idx = product
            .variants
            .iter()
            .position(|v| v.label == size_label)
            .ok_or_else(|| {
                AppError::not_found(format!("Size {size_label} on product {id}"))
            })?;

        let query_str = format!(
            "UPDATE $thing SET variants[{idx}].stock = variants[{idx}].stock + $delta, \
             total_stock = total_stock + $delta, updated_at = $now \
             WHERE variants[{idx}].label = $label AND variants[{idx}].stock + $delta >= 0 RETURN AFTER"
        );

        let mut result = self
            .base
            .db()
            .query(query_str)
            .bind(("thing", record_id(PRODUCT_TABLE, id)))
            .bind(("delta", delta))
            .bind(("label", size_label.to_string()))
            .bind(("now", shared::util::now_millis()))
            .await?;
        let updated: Vec<Product> = result.take(0)?;

        match updated.into_iter().next() {
            Some(p) => Ok(p),
            None => {
                // Condition did not hold; re-read to tell the caller why.
                let current = self.find_by_id(id).await?;
                match current.variants.iter().find(|v| v.label == size_label) {
                    Some(v) if v.stock + delta < 0 => {
                        Err(AppError::insufficient_stock(id, size_label))
                    }
                    Some(_) => Err(AppError::remote(format!(
                        "stock update on product {id} did not apply"
                    ))),
                    None => Err(AppError::not_found(format!(
                        "Size {size_label} on product {id}"
                    ))),
                }
            }
        }
    }

    /// Hard delete. Reviews of the product are NOT cascaded and remain as
    /// orphans retrievable through the review listing.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let deleted: Option<Product> =
            self.base.db().delete(record_id(PRODUCT_TABLE, id)).await?;
        if deleted.is_none() {
            return Err(AppError::not_found(format!("Product {id}")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory;
    use shared::models::SizeVariant;

    fn sample() -> ProductCreate {
        ProductCreate {
            name: "Denim Jacket".into(),
            brand: "Acme".into(),
            category: "jackets".into(),
            barcode: "8901234".into(),
            images: vec!["https://cdn/a.jpg".into(), "https://cdn/b.jpg".into()],
            description: "Stone washed".into(),
            variants: vec![
                SizeVariant {
                    label: "M".into(),
                    mrp: 2000,
                    selling_price: 1500,
                    stock: 2,
                },
                SizeVariant {
                    label: "L".into(),
                    mrp: 2000,
                    selling_price: 1600,
                    stock: 1,
                },
            ],
        }
    }

    #[tokio::test]
    async fn create_and_get_round_trip() {
        let repo = ProductRepository::new(open_memory().await.unwrap());
        let created = repo.create(sample()).await.unwrap();
        let id = created.id_string();
        assert!(!id.is_empty());

        let fetched = repo.find_by_id(&id).await.unwrap();
        assert_eq!(fetched.images[0], "https://cdn/a.jpg");
        assert_eq!(fetched.image, "https://cdn/a.jpg");
        assert_eq!(fetched.total_stock, 3);
        assert_eq!(fetched.rating, 0.0);
        assert_eq!(fetched.rating_count, 0);
    }

    #[tokio::test]
    async fn create_rejects_missing_fields() {
        let repo = ProductRepository::new(open_memory().await.unwrap());
        let mut data = sample();
        data.brand = "  ".into();
        let err = repo.create(data).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn find_by_id_missing_is_not_found() {
        let repo = ProductRepository::new(open_memory().await.unwrap());
        let err = repo.find_by_id("product:doesnotexist").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn stock_decrement_to_zero_succeeds() {
        let repo = ProductRepository::new(open_memory().await.unwrap());
        let created = repo.create(sample()).await.unwrap();
        let id = created.id_string();

        let updated = repo.update_stock(&id, "M", -2).await.unwrap();
        let m = updated.variants.iter().find(|v| v.label == "M").unwrap();
        assert_eq!(m.stock, 0);
        assert_eq!(updated.total_stock, 1); // only L's unit remains
    }

    #[tokio::test]
    async fn stock_below_zero_fails_and_leaves_stock_unchanged() {
        let repo = ProductRepository::new(open_memory().await.unwrap());
        let created = repo.create(sample()).await.unwrap();
        let id = created.id_string();

        let err = repo.update_stock(&id, "L", -2).await.unwrap_err();
        assert!(matches!(err, AppError::InsufficientStock { .. }));

        let current = repo.find_by_id(&id).await.unwrap();
        let l = current.variants.iter().find(|v| v.label == "L").unwrap();
        assert_eq!(l.stock, 1);
        assert_eq!(current.total_stock, 3);
    }

    #[tokio::test]
    async fn stock_unknown_size_is_not_found() {
        let repo = ProductRepository::new(open_memory().await.unwrap());
        let created = repo.create(sample()).await.unwrap();
        let err = repo
            .update_stock(&created.id_string(), "XXL", -1)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_variants_recomputes_total_stock() {
        let repo = ProductRepository::new(open_memory().await.unwrap());
        let created = repo.create(sample()).await.unwrap();
        let id = created.id_string();

        let updated = repo
            .update(
                &id,
                ProductUpdate {
                    variants: Some(vec![SizeVariant {
                        label: "M".into(),
                        mrp: 2000,
                        selling_price: 1400,
                        stock: 7,
                    }]),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.total_stock, 7);
        assert_eq!(updated.variants.len(), 1);
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let repo = ProductRepository::new(open_memory().await.unwrap());
        let created = repo.create(sample()).await.unwrap();
        let id = created.id_string();

        repo.delete(&id).await.unwrap();
        assert!(matches!(
            repo.find_by_id(&id).await.unwrap_err(),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            repo.delete(&id).await.unwrap_err(),
            AppError::NotFound(_)
        ));
    }
}
