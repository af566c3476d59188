//! Review Repository
//!
//! Review CRUD plus maintenance of the parent product's aggregate rating.
//! The review write and the aggregate update are two separate store calls;
//! a crash between them leaves an orphaned review with no aggregate
//! contribution. Each aggregate update itself is a single statement.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, record_id};
use crate::common::{AppError, AppResult};
use crate::db::models::{Product, Review, ReviewCreate};

const REVIEW_TABLE: &str = "review";
const PRODUCT_TABLE: &str = "product";

#[derive(Clone)]
pub struct ReviewRepository {
    base: BaseRepository,
}

impl ReviewRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Append a review and fold its rating into the parent product:
    /// `rating' = (rating·count + r) / (count + 1)`, `count' = count + 1`.
    pub async fn add_rating(
        &self,
        data: ReviewCreate,
        customer_id: &str,
        customer_name: &str,
        customer_phone: &str,
    ) -> AppResult<Review> {
        if !(1..=5).contains(&data.rating) {
            return Err(AppError::validation("rating must be between 1 and 5"));
        }

        let review = Review {
            id: None,
            product_id: data.product_id.clone(),
            customer_id: customer_id.to_string(),
            customer_name: customer_name.to_string(),
            customer_phone: customer_phone.to_string(),
            rating: data.rating,
            text: data.text,
            images: data.images,
            created_at: shared::util::now_millis(),
        };

        let created: Option<Review> = self
            .base
            .db()
            .create(REVIEW_TABLE)
            .content(review)
            .await?;
        let created = created.ok_or_else(|| AppError::remote("failed to create review"))?;

        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $product SET \
                 rating = (rating * rating_count + $r) / (rating_count + 1), \
                 rating_count = rating_count + 1 \
                 RETURN AFTER",
            )
            .bind(("product", record_id(PRODUCT_TABLE, &data.product_id)))
            .bind(("r", data.rating as f64))
            .await?;
        let updated: Vec<Product> = result.take(0)?;
        if updated.is_empty() {
            // The review stays behind as an orphan, mirroring the two-write
            // sequence's failure mode.
            return Err(AppError::not_found(format!("Product {}", data.product_id)));
        }

        Ok(created)
    }

    /// Delete a review and back its rating out of the parent aggregate:
    /// `count' = max(0, count - 1)`, `rating' = 0` when the count hits zero,
    /// else `(rating·count - r) / (count - 1)`. A missing parent product is
    /// a silent no-op.
    pub async fn delete(&self, review_id: &str) -> AppResult<()> {
        let thing = record_id(REVIEW_TABLE, review_id);
        let review: Option<Review> = self.base.db().select(thing.clone()).await?;
        let review = review.ok_or_else(|| AppError::not_found(format!("Review {review_id}")))?;

        let _: Option<Review> = self.base.db().delete(thing).await?;

        self.base
            .db()
            .query(
                "UPDATE $product SET \
                 rating = IF rating_count <= 1 { 0f } ELSE { (rating * rating_count - $r) / (rating_count - 1) }, \
                 rating_count = math::max([0, rating_count - 1])",
            )
            .bind(("product", record_id(PRODUCT_TABLE, &review.product_id)))
            .bind(("r", review.rating as f64))
            .await?;

        Ok(())
    }

    /// Reviews of one product, newest first. Queries by the product id
    /// field, so reviews of a deleted product still resolve here.
    pub async fn find_by_product(&self, product_id: &str) -> AppResult<Vec<Review>> {
        let reviews: Vec<Review> = self
            .base
            .db()
            .query("SELECT * FROM review WHERE product_id = $pid ORDER BY created_at DESC")
            .bind(("pid", product_id.to_string()))
            .await?
            .take(0)?;
        Ok(reviews)
    }

    /// All reviews, newest first.
    pub async fn find_all(&self) -> AppResult<Vec<Review>> {
        let reviews: Vec<Review> = self
            .base
            .db()
            .query("SELECT * FROM review ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(reviews)
    }
}
