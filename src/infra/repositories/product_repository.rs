//! Product repository over the document store.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Map, Value};
use uuid::Uuid;

use crate::config::COLLECTION_PRODUCTS;
use crate::domain::{CreateProduct, Product, UpdateProduct};
use crate::errors::{AppError, AppResult};
use crate::infra::docstore::{DocumentStore, Filter};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Product repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Find product by id
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Product>>;

    /// List the whole catalog
    async fn list(&self) -> AppResult<Vec<Product>>;

    /// List products referencing a category
    async fn list_by_category(&self, category_id: &str) -> AppResult<Vec<Product>>;

    /// Create a new product (admin)
    async fn create(&self, payload: CreateProduct) -> AppResult<Product>;

    /// Apply a partial update (admin)
    async fn update(&self, id: &str, changes: UpdateProduct) -> AppResult<Product>;

    /// Delete a product (admin)
    async fn delete(&self, id: &str) -> AppResult<()>;

    /// Atomically decrement finite stock by `quantity`, clamped at zero.
    /// Unlimited stock is left untouched.
    async fn decrement_stock(&self, id: &str, quantity: u32) -> AppResult<()>;

    /// Persist a recomputed rating aggregate.
    async fn apply_rating(&self, id: &str, rating_sum: f64, review_count: u32) -> AppResult<()>;
}

/// Concrete implementation of ProductRepository
pub struct ProductCollection {
    store: Arc<dyn DocumentStore>,
}

impl ProductCollection {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

fn decode(document: Value) -> AppResult<Product> {
    Ok(serde_json::from_value(document)?)
}

fn decode_all(documents: Vec<Value>) -> AppResult<Vec<Product>> {
    documents.into_iter().map(decode).collect()
}

#[async_trait]
impl ProductRepository for ProductCollection {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Product>> {
        let document = self.store.get(COLLECTION_PRODUCTS, id).await?;
        document.map(decode).transpose()
    }

    async fn list(&self) -> AppResult<Vec<Product>> {
        let documents = self.store.query(COLLECTION_PRODUCTS, &[], None).await?;
        decode_all(documents)
    }

    async fn list_by_category(&self, category_id: &str) -> AppResult<Vec<Product>> {
        let documents = self
            .store
            .query(
                COLLECTION_PRODUCTS,
                &[Filter::eq("category_id", category_id)],
                None,
            )
            .await?;
        decode_all(documents)
    }

    async fn create(&self, payload: CreateProduct) -> AppResult<Product> {
        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4().to_string(),
            name: payload.name,
            description: payload.description,
            price: payload.price,
            stock: payload.stock,
            category_id: payload.category_id,
            image_url: payload.image_url,
            rating_sum: 0.0,
            review_count: 0,
            created_at: now,
            updated_at: now,
        };

        self.store
            .insert(COLLECTION_PRODUCTS, &product.id, serde_json::to_value(&product)?)
            .await?;
        Ok(product)
    }

    async fn update(&self, id: &str, changes: UpdateProduct) -> AppResult<Product> {
        let mut product = self.find_by_id(id).await?.ok_or(AppError::NotFound)?;

        let mut fields = Map::new();
        if let Some(name) = changes.name {
            product.name = name.clone();
            fields.insert("name".into(), json!(name));
        }
        if let Some(description) = changes.description {
            product.description = Some(description.clone());
            fields.insert("description".into(), json!(description));
        }
        if let Some(price) = changes.price {
            product.price = price;
            fields.insert("price".into(), json!(price));
        }
        if let Some(stock) = changes.stock {
            product.stock = stock;
            fields.insert("stock".into(), json!(stock));
        }
        if let Some(category_id) = changes.category_id {
            product.category_id = category_id.clone();
            fields.insert("category_id".into(), json!(category_id));
        }
        if let Some(image_url) = changes.image_url {
            product.image_url = Some(image_url.clone());
            fields.insert("image_url".into(), json!(image_url));
        }

        product.updated_at = Utc::now();
        fields.insert("updated_at".into(), json!(product.updated_at));

        self.store.update(COLLECTION_PRODUCTS, id, fields).await?;
        Ok(product)
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        self.store.delete(COLLECTION_PRODUCTS, id).await
    }

    async fn decrement_stock(&self, id: &str, quantity: u32) -> AppResult<()> {
        let product = self.find_by_id(id).await?.ok_or(AppError::NotFound)?;
        if product.stock.is_none() {
            return Ok(());
        }

        self.store
            .adjust(COLLECTION_PRODUCTS, id, "stock", -(quantity as f64), Some(0.0))
            .await?;
        Ok(())
    }

    async fn apply_rating(&self, id: &str, rating_sum: f64, review_count: u32) -> AppResult<()> {
        let mut fields = Map::new();
        fields.insert("rating_sum".into(), json!(rating_sum));
        fields.insert("review_count".into(), json!(review_count));
        fields.insert("updated_at".into(), json!(Utc::now()));
        self.store.update(COLLECTION_PRODUCTS, id, fields).await
    }
}
