//! Review service - purchase-gated reviews with an incremental aggregate.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::domain::{OrderStatus, Review, SubmitReview};
use crate::errors::{AppError, AppResult};
use crate::infra::{OrderRepository, ProductRepository, ReviewRepository};

/// Review service trait for dependency injection.
#[async_trait]
pub trait ReviewService: Send + Sync {
    /// Submit a review. Requires a completed order of the caller that
    /// contains the product, and at most one review per `(user, product)`.
    async fn submit_review(&self, user_id: &str, submission: SubmitReview) -> AppResult<Review>;

    /// Reviews of a product, newest first.
    async fn reviews_for_product(&self, product_id: &str) -> AppResult<Vec<Review>>;
}

/// Concrete implementation of ReviewService
pub struct ReviewManager {
    reviews: Arc<dyn ReviewRepository>,
    orders: Arc<dyn OrderRepository>,
    products: Arc<dyn ProductRepository>,
}

impl ReviewManager {
    pub fn new(
        reviews: Arc<dyn ReviewRepository>,
        orders: Arc<dyn OrderRepository>,
        products: Arc<dyn ProductRepository>,
    ) -> Self {
        Self { reviews, orders, products }
    }

    /// Proof of purchase: scan the caller's completed orders for the
    /// product and return the first matching order id.
    async fn completed_order_containing(
        &self,
        user_id: &str,
        product_id: &str,
    ) -> AppResult<Option<String>> {
        let orders = self.orders.list_for_user(user_id).await?;
        Ok(orders
            .into_iter()
            .filter(|o| o.status == OrderStatus::Completed)
            .find(|o| o.contains_product(product_id))
            .map(|o| o.id))
    }
}

#[async_trait]
impl ReviewService for ReviewManager {
    async fn submit_review(&self, user_id: &str, submission: SubmitReview) -> AppResult<Review> {
        submission.validate()?;

        // Precondition checks happen before any write, so a rejected
        // submission leaves the aggregate untouched
        if self
            .reviews
            .find_for_user_product(user_id, &submission.product_id)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("Review"));
        }

        let order_id = self
            .completed_order_containing(user_id, &submission.product_id)
            .await?
            .ok_or_else(|| {
                AppError::validation("Only products from completed orders can be reviewed")
            })?;

        let mut product = self
            .products
            .find_by_id(&submission.product_id)
            .await?
            .ok_or(AppError::NotFound)?;

        let review = Review {
            id: Uuid::new_v4().to_string(),
            product_id: submission.product_id,
            user_id: user_id.to_string(),
            order_id,
            rating: submission.rating,
            comment: submission.comment,
            created_at: Utc::now(),
        };
        self.reviews.create(review.clone()).await?;

        product.record_rating(review.rating);
        self.products
            .apply_rating(&product.id, product.rating_sum, product.review_count)
            .await?;

        tracing::info!(product_id = %review.product_id, rating = review.rating, "Review recorded");
        Ok(review)
    }

    async fn reviews_for_product(&self, product_id: &str) -> AppResult<Vec<Review>> {
        self.reviews.list_for_product(product_id).await
    }
}
