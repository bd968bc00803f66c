//! Category repository over the document store.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Map, Value};
use uuid::Uuid;

use crate::config::COLLECTION_CATEGORIES;
use crate::domain::{Category, CreateCategory, UpdateCategory};
use crate::errors::{AppError, AppResult};
use crate::infra::docstore::DocumentStore;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Category repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Find category by id
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Category>>;

    /// List all categories in stored order
    async fn list(&self) -> AppResult<Vec<Category>>;

    /// Create a new category (admin)
    async fn create(&self, payload: CreateCategory) -> AppResult<Category>;

    /// Apply a partial update (admin)
    async fn update(&self, id: &str, changes: UpdateCategory) -> AppResult<Category>;

    /// Delete a category (admin). Products referencing it are left in place.
    async fn delete(&self, id: &str) -> AppResult<()>;
}

/// Concrete implementation of CategoryRepository
pub struct CategoryCollection {
    store: Arc<dyn DocumentStore>,
}

impl CategoryCollection {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

fn decode(document: Value) -> AppResult<Category> {
    Ok(serde_json::from_value(document)?)
}

#[async_trait]
impl CategoryRepository for CategoryCollection {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Category>> {
        let document = self.store.get(COLLECTION_CATEGORIES, id).await?;
        document.map(decode).transpose()
    }

    async fn list(&self) -> AppResult<Vec<Category>> {
        let documents = self.store.query(COLLECTION_CATEGORIES, &[], None).await?;
        documents.into_iter().map(decode).collect()
    }

    async fn create(&self, payload: CreateCategory) -> AppResult<Category> {
        let category = Category {
            id: Uuid::new_v4().to_string(),
            name: payload.name,
            image_url: payload.image_url,
        };

        self.store
            .insert(COLLECTION_CATEGORIES, &category.id, serde_json::to_value(&category)?)
            .await?;
        Ok(category)
    }

    async fn update(&self, id: &str, changes: UpdateCategory) -> AppResult<Category> {
        let mut category = self.find_by_id(id).await?.ok_or(AppError::NotFound)?;

        let mut fields = Map::new();
        if let Some(name) = changes.name {
            category.name = name.clone();
            fields.insert("name".into(), json!(name));
        }
        if let Some(image_url) = changes.image_url {
            category.image_url = Some(image_url.clone());
            fields.insert("image_url".into(), json!(image_url));
        }

        if !fields.is_empty() {
            self.store.update(COLLECTION_CATEGORIES, id, fields).await?;
        }
        Ok(category)
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        self.store.delete(COLLECTION_CATEGORIES, id).await
    }
}
