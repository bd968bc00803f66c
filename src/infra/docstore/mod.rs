//! Black-box document store boundary.
//!
//! The hosted document database is consumed through the [`DocumentStore`]
//! trait: plain CRUD, equality-predicate queries with optional ordering,
//! and an atomic clamped numeric adjustment used for stock decrements.
//! Query semantics, indexing and consistency all belong to the remote
//! service; nothing here adds coordination on top.

mod memory;
mod rest;

pub use memory::MemoryStore;
pub use rest::RestStore;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::errors::AppResult;

/// Single-field equality predicate.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub field: String,
    pub value: Value,
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self { field: field.into(), value: value.into() }
    }
}

/// Server-side ordering request for a query.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub field: String,
    pub descending: bool,
}

/// Remote document CRUD/query surface.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Create a document; rejects an id that already exists.
    async fn insert(&self, collection: &str, id: &str, document: Value) -> AppResult<()>;

    /// Fetch a document by id.
    async fn get(&self, collection: &str, id: &str) -> AppResult<Option<Value>>;

    /// Merge the given fields into an existing document.
    async fn update(&self, collection: &str, id: &str, fields: Map<String, Value>) -> AppResult<()>;

    /// Delete a document by id.
    async fn delete(&self, collection: &str, id: &str) -> AppResult<()>;

    /// Fetch all documents matching every equality predicate, optionally
    /// ordered server-side on a single field.
    async fn query(
        &self,
        collection: &str,
        filters: &[Filter],
        order: Option<&OrderBy>,
    ) -> AppResult<Vec<Value>>;

    /// Atomically add `delta` to a numeric field, clamping the result at
    /// `floor` when one is given, and return the new value. A missing
    /// field counts as zero.
    async fn adjust(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        delta: f64,
        floor: Option<f64>,
    ) -> AppResult<f64>;
}
