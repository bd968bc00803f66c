//! In-memory document store.
//!
//! Backs unit and integration tests, and embedded use where no remote
//! store is configured. Semantics mirror the hosted service: upserts are
//! rejected on insert, updates merge fields, queries are equality-only.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use serde_json::{Map, Number, Value};
use tokio::sync::RwLock;

use super::{DocumentStore, Filter, OrderBy};
use crate::errors::{AppError, AppResult};

/// HashMap-backed [`DocumentStore`].
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, BTreeMap<String, Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches(document: &Value, filters: &[Filter]) -> bool {
    filters
        .iter()
        .all(|f| document.get(&f.field) == Some(&f.value))
}

fn compare(a: &Value, b: &Value) -> std::cmp::Ordering {
    use std::cmp::Ordering;
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .unwrap_or(0.0)
            .total_cmp(&y.as_f64().unwrap_or(0.0)),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(&self, collection: &str, id: &str, document: Value) -> AppResult<()> {
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();
        if docs.contains_key(id) {
            return Err(AppError::conflict(format!("Document {}/{}", collection, id)));
        }
        docs.insert(id.to_string(), document);
        Ok(())
    }

    async fn get(&self, collection: &str, id: &str) -> AppResult<Option<Value>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned())
    }

    async fn update(&self, collection: &str, id: &str, fields: Map<String, Value>) -> AppResult<()> {
        let mut collections = self.collections.write().await;
        let document = collections
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or(AppError::NotFound)?;

        let object = document
            .as_object_mut()
            .ok_or_else(|| AppError::internal("Document is not an object"))?;
        for (key, value) in fields {
            object.insert(key, value);
        }
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> AppResult<()> {
        let mut collections = self.collections.write().await;
        let removed = collections
            .get_mut(collection)
            .and_then(|docs| docs.remove(id));
        if removed.is_none() {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn query(
        &self,
        collection: &str,
        filters: &[Filter],
        order: Option<&OrderBy>,
    ) -> AppResult<Vec<Value>> {
        let collections = self.collections.read().await;
        let mut results: Vec<Value> = collections
            .get(collection)
            .map(|docs| {
                docs.values()
                    .filter(|d| matches(d, filters))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if let Some(order) = order {
            results.sort_by(|a, b| {
                let ordering = compare(
                    a.get(&order.field).unwrap_or(&Value::Null),
                    b.get(&order.field).unwrap_or(&Value::Null),
                );
                if order.descending {
                    ordering.reverse()
                } else {
                    ordering
                }
            });
        }

        Ok(results)
    }

    async fn adjust(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        delta: f64,
        floor: Option<f64>,
    ) -> AppResult<f64> {
        let mut collections = self.collections.write().await;
        let document = collections
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or(AppError::NotFound)?;

        let object = document
            .as_object_mut()
            .ok_or_else(|| AppError::internal("Document is not an object"))?;

        let current = object
            .get(field)
            .and_then(Value::as_f64)
            .unwrap_or(0.0);
        let mut next = current + delta;
        if let Some(floor) = floor {
            next = next.max(floor);
        }

        // Keep integral counters integral so typed reads round-trip
        let number = if next.fract() == 0.0 && next.abs() < i64::MAX as f64 {
            Number::from(next as i64)
        } else {
            Number::from_f64(next)
                .ok_or_else(|| AppError::internal("Adjusted value is not representable"))?
        };
        object.insert(field.to_string(), Value::Number(number));
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn insert_rejects_duplicate_ids() {
        let store = MemoryStore::new();
        store.insert("products", "p1", json!({"id": "p1"})).await.unwrap();
        let err = store.insert("products", "p1", json!({"id": "p1"})).await;
        assert!(matches!(err, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn query_filters_on_equality_and_orders() {
        let store = MemoryStore::new();
        for (id, status, total) in [("o1", "pending", 10), ("o2", "completed", 30), ("o3", "pending", 20)] {
            store
                .insert("orders", id, json!({"id": id, "status": status, "total": total}))
                .await
                .unwrap();
        }

        let pending = store
            .query(
                "orders",
                &[Filter::eq("status", "pending")],
                Some(&OrderBy { field: "total".into(), descending: true }),
            )
            .await
            .unwrap();
        let ids: Vec<_> = pending.iter().map(|d| d["id"].as_str().unwrap()).collect();
        assert_eq!(ids, vec!["o3", "o1"]);
    }

    #[tokio::test]
    async fn adjust_clamps_at_floor() {
        let store = MemoryStore::new();
        store.insert("products", "p1", json!({"id": "p1", "stock": 2})).await.unwrap();

        let left = store.adjust("products", "p1", "stock", -5.0, Some(0.0)).await.unwrap();
        assert_eq!(left, 0.0);

        let doc = store.get("products", "p1").await.unwrap().unwrap();
        assert_eq!(doc["stock"].as_f64().unwrap(), 0.0);
    }
}
