//! Review Model

use serde::{Deserialize, Serialize};
use shared::util::{mask_name, mask_phone};
use surrealdb::RecordId;

use super::serde_helpers;

/// Review entity
///
/// Stored unmasked; customer name and phone are masked at display time via
/// [`ReviewView`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    pub product_id: String,
    pub customer_id: String,
    pub customer_name: String,
    pub customer_phone: String,
    /// Integer rating 1-5
    pub rating: u8,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub created_at: i64,
}

impl Review {
    pub fn id_string(&self) -> String {
        self.id.as_ref().map(|id| id.to_string()).unwrap_or_default()
    }
}

/// Create review payload
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewCreate {
    pub product_id: String,
    pub rating: u8,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub images: Vec<String>,
}

/// Customer-facing projection with masked identity
#[derive(Debug, Clone, Serialize)]
pub struct ReviewView {
    pub id: String,
    pub product_id: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub rating: u8,
    pub text: String,
    pub images: Vec<String>,
    pub created_at: i64,
}

impl From<Review> for ReviewView {
    fn from(review: Review) -> Self {
        Self {
            id: review.id_string(),
            product_id: review.product_id.clone(),
            customer_name: mask_name(&review.customer_name),
            customer_phone: mask_phone(&review.customer_phone),
            rating: review.rating,
            text: review.text,
            images: review.images,
            created_at: review.created_at,
        }
    }
}
