//! Product entity and admin-side payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::{lenient_price, round1};

/// Product catalog entry.
///
/// `stock` of `None` means unlimited; `Some(0)` means sold out. The rating
/// aggregate keeps the running sum and count so the displayed average can be
/// computed on read instead of storing a rounded value that drifts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: f64,
    #[serde(default)]
    pub stock: Option<u32>,
    pub category_id: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub rating_sum: f64,
    #[serde(default)]
    pub review_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Whether at least one unit can be added to a cart.
    pub fn in_stock(&self) -> bool {
        self.stock.map_or(true, |s| s > 0)
    }

    /// Displayed average rating, rounded to one decimal. Zero with no reviews.
    pub fn average_rating(&self) -> f64 {
        if self.review_count == 0 {
            0.0
        } else {
            round1(self.rating_sum / self.review_count as f64)
        }
    }

    /// Fold a new rating into the running aggregate.
    pub fn record_rating(&mut self, rating: u8) {
        self.rating_sum += rating as f64;
        self.review_count += 1;
    }
}

/// Admin payload for creating a product.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProduct {
    #[validate(length(min = 1, message = "Product name is required"))]
    pub name: String,
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: f64,
    pub stock: Option<u32>,
    #[validate(length(min = 1, message = "Category is required"))]
    pub category_id: String,
    pub image_url: Option<String>,
}

/// Admin payload for updating a product. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProduct {
    #[validate(length(min = 1, message = "Product name cannot be empty"))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: Option<f64>,
    pub stock: Option<Option<u32>>,
    pub category_id: Option<String>,
    pub image_url: Option<String>,
}
