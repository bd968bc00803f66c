//! Order repository over the document store.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Map, Value};

use crate::config::COLLECTION_ORDERS;
use crate::domain::{Order, OrderStatus};
use crate::errors::AppResult;
use crate::infra::docstore::{DocumentStore, Filter};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Order repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persist a freshly placed order
    async fn create(&self, order: Order) -> AppResult<()>;

    /// Find order by id
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Order>>;

    /// A user's orders, newest first
    async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<Order>>;

    /// Orders in a given state, newest first (admin console)
    async fn list_by_status(&self, status: OrderStatus) -> AppResult<Vec<Order>>;

    /// Count of orders in a given state (pending-order feed)
    async fn count_by_status(&self, status: OrderStatus) -> AppResult<usize>;

    /// Persist a status transition; only `status` and `updated_at` change
    async fn set_status(&self, id: &str, status: OrderStatus) -> AppResult<()>;
}

/// Concrete implementation of OrderRepository
pub struct OrderCollection {
    store: Arc<dyn DocumentStore>,
}

impl OrderCollection {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

fn decode(document: Value) -> AppResult<Order> {
    Ok(serde_json::from_value(document)?)
}

// Combining an equality predicate with a server-side order on another field
// needs a composite index at the store; sort after fetching instead.
fn newest_first(mut orders: Vec<Order>) -> Vec<Order> {
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    orders
}

#[async_trait]
impl OrderRepository for OrderCollection {
    async fn create(&self, order: Order) -> AppResult<()> {
        self.store
            .insert(COLLECTION_ORDERS, &order.id, serde_json::to_value(&order)?)
            .await
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Order>> {
        let document = self.store.get(COLLECTION_ORDERS, id).await?;
        document.map(decode).transpose()
    }

    async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<Order>> {
        let documents = self
            .store
            .query(COLLECTION_ORDERS, &[Filter::eq("user_id", user_id)], None)
            .await?;
        let orders = documents.into_iter().map(decode).collect::<AppResult<Vec<_>>>()?;
        Ok(newest_first(orders))
    }

    async fn list_by_status(&self, status: OrderStatus) -> AppResult<Vec<Order>> {
        let documents = self
            .store
            .query(
                COLLECTION_ORDERS,
                &[Filter::eq("status", status.to_string())],
                None,
            )
            .await?;
        let orders = documents.into_iter().map(decode).collect::<AppResult<Vec<_>>>()?;
        Ok(newest_first(orders))
    }

    async fn count_by_status(&self, status: OrderStatus) -> AppResult<usize> {
        let documents = self
            .store
            .query(
                COLLECTION_ORDERS,
                &[Filter::eq("status", status.to_string())],
                None,
            )
            .await?;
        Ok(documents.len())
    }

    async fn set_status(&self, id: &str, status: OrderStatus) -> AppResult<()> {
        let mut fields = Map::new();
        fields.insert("status".into(), json!(status));
        fields.insert("updated_at".into(), json!(Utc::now()));
        self.store.update(COLLECTION_ORDERS, id, fields).await
    }
}
