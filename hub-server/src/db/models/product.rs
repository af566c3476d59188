//! Product Model

use serde::{Deserialize, Serialize};
use shared::models::{SizeVariant, total_stock};
use surrealdb::RecordId;

use super::serde_helpers;

/// Product entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    pub name: String,
    pub brand: String,
    pub category: String,
    /// External SKU string
    pub barcode: String,
    /// Ordered image URLs, first is primary
    #[serde(default)]
    pub images: Vec<String>,
    /// Legacy single-image field, mirrors `images[0]`
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
    pub variants: Vec<SizeVariant>,
    /// Derived: sum of variant stock, kept in sync on every stock mutation
    pub total_stock: i64,
    /// Weighted mean of review ratings
    pub rating: f64,
    pub rating_count: u32,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Product {
    /// Primary image URL: `images[0]`, falling back to the legacy field.
    pub fn primary_image(&self) -> &str {
        self.images.first().map(String::as_str).unwrap_or(&self.image)
    }

    /// "table:key" id string, empty before the record is persisted.
    pub fn id_string(&self) -> String {
        self.id.as_ref().map(|id| id.to_string()).unwrap_or_default()
    }
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub brand: String,
    pub category: String,
    pub barcode: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub description: String,
    pub variants: Vec<SizeVariant>,
}

impl ProductCreate {
    /// Build the entity persisted at creation time.
    pub(crate) fn into_product(self, now: i64) -> Product {
        let images: Vec<String> = self
            .images
            .into_iter()
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .collect();
        let image = images.first().cloned().unwrap_or_default();
        let total_stock = total_stock(&self.variants);

        Product {
            id: None,
            name: self.name,
            brand: self.brand,
            category: self.category,
            barcode: self.barcode,
            images,
            image,
            description: self.description,
            variants: self.variants,
            total_stock,
            rating: 0.0,
            rating_count: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Update product payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub barcode: Option<String>,
    pub images: Option<Vec<String>>,
    pub description: Option<String>,
    pub variants: Option<Vec<SizeVariant>>,
}

/// Catalog filter, all criteria optional and conjunctive
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub brand: Option<String>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    /// Matches name/brand substring (case-insensitive) or exact barcode
    pub q: Option<String>,
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = &self.category
            && &product.category != category
        {
            return false;
        }
        if let Some(brand) = &self.brand
            && &product.brand != brand
        {
            return false;
        }
        if self.min_price.is_some() || self.max_price.is_some() {
            let min = shared::models::min_selling_price(&product.variants);
            let max = product
                .variants
                .iter()
                .map(|v| v.selling_price)
                .max()
                .unwrap_or(0);
            if let Some(floor) = self.min_price
                && min < floor
            {
                return false;
            }
            if let Some(ceil) = self.max_price
                && max > ceil
            {
                return false;
            }
        }
        if let Some(q) = &self.q {
            let q_lower = q.to_lowercase();
            if !product.name.to_lowercase().contains(&q_lower)
                && !product.brand.to_lowercase().contains(&q_lower)
                && product.barcode != *q
            {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> Product {
        ProductCreate {
            name: "Denim Jacket".into(),
            brand: "Acme".into(),
            category: "jackets".into(),
            barcode: "8901234".into(),
            images: vec!["https://cdn/a.jpg ".into(), String::new(), "https://cdn/b.jpg".into()],
            description: String::new(),
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
        .into_product(1_700_000_000_000)
    }

    #[test]
    fn create_normalizes_images_and_stock() {
        let p = product();
        assert_eq!(p.images, vec!["https://cdn/a.jpg", "https://cdn/b.jpg"]);
        assert_eq!(p.image, "https://cdn/a.jpg");
        assert_eq!(p.primary_image(), "https://cdn/a.jpg");
        assert_eq!(p.total_stock, 3);
        assert_eq!(p.rating, 0.0);
        assert_eq!(p.rating_count, 0);
    }

    #[test]
    fn filter_matching() {
        let p = product();
        let all = ProductFilter::default();
        assert!(all.matches(&p));

        let by_brand = ProductFilter {
            brand: Some("Acme".into()),
            ..Default::default()
        };
        assert!(by_brand.matches(&p));

        let by_price = ProductFilter {
            min_price: Some(1550),
            ..Default::default()
        };
        assert!(!by_price.matches(&p)); // cheapest variant is 1500

        let by_search = ProductFilter {
            q: Some("denim".into()),
            ..Default::default()
        };
        assert!(by_search.matches(&p));

        let by_barcode = ProductFilter {
            q: Some("8901234".into()),
            ..Default::default()
        };
        assert!(by_barcode.matches(&p));
    }
}
