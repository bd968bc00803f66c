//! Review repository over the document store.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::config::COLLECTION_REVIEWS;
use crate::domain::Review;
use crate::errors::AppResult;
use crate::infra::docstore::{DocumentStore, Filter};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Review repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// The review a user wrote for a product, if any
    async fn find_for_user_product(&self, user_id: &str, product_id: &str)
        -> AppResult<Option<Review>>;

    /// All reviews of a product, newest first
    async fn list_for_product(&self, product_id: &str) -> AppResult<Vec<Review>>;

    /// Persist a new review
    async fn create(&self, review: Review) -> AppResult<()>;
}

/// Concrete implementation of ReviewRepository
pub struct ReviewCollection {
    store: Arc<dyn DocumentStore>,
}

impl ReviewCollection {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

fn decode(document: Value) -> AppResult<Review> {
    Ok(serde_json::from_value(document)?)
}

#[async_trait]
impl ReviewRepository for ReviewCollection {
    async fn find_for_user_product(
        &self,
        user_id: &str,
        product_id: &str,
    ) -> AppResult<Option<Review>> {
        let documents = self
            .store
            .query(
                COLLECTION_REVIEWS,
                &[Filter::eq("user_id", user_id), Filter::eq("product_id", product_id)],
                None,
            )
            .await?;
        documents.into_iter().next().map(decode).transpose()
    }

    async fn list_for_product(&self, product_id: &str) -> AppResult<Vec<Review>> {
        let documents = self
            .store
            .query(COLLECTION_REVIEWS, &[Filter::eq("product_id", product_id)], None)
            .await?;
        let mut reviews = documents
            .into_iter()
            .map(decode)
            .collect::<AppResult<Vec<_>>>()?;
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reviews)
    }

    async fn create(&self, review: Review) -> AppResult<()> {
        self.store
            .insert(COLLECTION_REVIEWS, &review.id, serde_json::to_value(&review)?)
            .await
    }
}
