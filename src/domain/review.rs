//! Product reviews.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;


/// A review, created at most once per `(user, product)` pair and only with
/// proof of a completed order containing the product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub product_id: String,
    pub user_id: String,
    /// Completed order the purchase proof came from.
    pub order_id: String,
    pub rating: u8,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

/// Review submission payload.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitReview {
    pub product_id: String,
    #[validate(range(min = 1, max = 5, message = "Rating must be 1 to 5 stars"))]
    pub rating: u8,
    #[validate(length(min = 10, message = "Comment is too short"))]
    pub comment: String,
}
