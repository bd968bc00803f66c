//! Cart repository over the document store.
//!
//! Lines are keyed by `(user_id, product_id)`; lookups use single-field
//! equality predicates only.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Map, Value};

use crate::config::COLLECTION_CART_ITEMS;
use crate::domain::CartItem;
use crate::errors::AppResult;
use crate::infra::docstore::{DocumentStore, Filter};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Cart repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CartRepository: Send + Sync {
    /// Find the line for `(user, product)` if one exists
    async fn find_line(&self, user_id: &str, product_id: &str) -> AppResult<Option<CartItem>>;

    /// All lines in a user's cart
    async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<CartItem>>;

    /// Create a new line
    async fn create(&self, item: CartItem) -> AppResult<()>;

    /// Persist a new quantity for a line
    async fn set_quantity(&self, line_id: &str, quantity: u32) -> AppResult<()>;

    /// Delete a single line
    async fn delete(&self, line_id: &str) -> AppResult<()>;

    /// Delete every line of a user's cart, one write per line
    async fn clear_for_user(&self, user_id: &str) -> AppResult<()>;
}

/// Concrete implementation of CartRepository
pub struct CartCollection {
    store: Arc<dyn DocumentStore>,
}

impl CartCollection {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

fn decode(document: Value) -> AppResult<CartItem> {
    Ok(serde_json::from_value(document)?)
}

#[async_trait]
impl CartRepository for CartCollection {
    async fn find_line(&self, user_id: &str, product_id: &str) -> AppResult<Option<CartItem>> {
        let documents = self
            .store
            .query(
                COLLECTION_CART_ITEMS,
                &[Filter::eq("user_id", user_id), Filter::eq("product_id", product_id)],
                None,
            )
            .await?;
        documents.into_iter().next().map(decode).transpose()
    }

    async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<CartItem>> {
        let documents = self
            .store
            .query(COLLECTION_CART_ITEMS, &[Filter::eq("user_id", user_id)], None)
            .await?;
        documents.into_iter().map(decode).collect()
    }

    async fn create(&self, item: CartItem) -> AppResult<()> {
        self.store
            .insert(COLLECTION_CART_ITEMS, &item.id, serde_json::to_value(&item)?)
            .await
    }

    async fn set_quantity(&self, line_id: &str, quantity: u32) -> AppResult<()> {
        let mut fields = Map::new();
        fields.insert("quantity".into(), json!(quantity));
        self.store.update(COLLECTION_CART_ITEMS, line_id, fields).await
    }

    async fn delete(&self, line_id: &str) -> AppResult<()> {
        self.store.delete(COLLECTION_CART_ITEMS, line_id).await
    }

    async fn clear_for_user(&self, user_id: &str) -> AppResult<()> {
        let lines = self.list_for_user(user_id).await?;
        for line in lines {
            self.store.delete(COLLECTION_CART_ITEMS, &line.id).await?;
        }
        Ok(())
    }
}
