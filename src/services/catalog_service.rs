//! Catalog service - browsing, search and admin catalog management.

use std::sync::Arc;

use async_trait::async_trait;
use validator::Validate;

use crate::browse::paginate;
use crate::config::CATEGORY_PAGE_SIZE;
use crate::domain::{
    Category, CreateCategory, CreateProduct, Product, UpdateCategory, UpdateProduct,
};
use crate::errors::{AppError, AppResult};
use crate::infra::{CategoryRepository, PreferenceStore, ProductRepository};
use crate::search::{filter_and_sort, SortOrder};

/// Catalog service trait for dependency injection.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Fetch a single product
    async fn product(&self, id: &str) -> AppResult<Product>;

    /// The whole catalog
    async fn products(&self) -> AppResult<Vec<Product>>;

    /// Products of one category
    async fn products_in_category(&self, category_id: &str) -> AppResult<Vec<Product>>;

    /// Search the catalog. A non-blank query is recorded in the local
    /// recent-search history.
    async fn search(&self, raw_query: &str, sort: SortOrder) -> AppResult<Vec<Product>>;

    /// Category strip partitioned into fixed-size pages
    async fn category_pages(&self) -> AppResult<Vec<Vec<Category>>>;

    // Admin console operations
    async fn create_product(&self, payload: CreateProduct) -> AppResult<Product>;
    async fn update_product(&self, id: &str, changes: UpdateProduct) -> AppResult<Product>;
    async fn delete_product(&self, id: &str) -> AppResult<()>;
    async fn create_category(&self, payload: CreateCategory) -> AppResult<Category>;
    async fn update_category(&self, id: &str, changes: UpdateCategory) -> AppResult<Category>;
    /// Deleting a category does not cascade to its products.
    async fn delete_category(&self, id: &str) -> AppResult<()>;
}

/// Concrete implementation of CatalogService
pub struct CatalogManager {
    products: Arc<dyn ProductRepository>,
    categories: Arc<dyn CategoryRepository>,
    prefs: Arc<PreferenceStore>,
}

impl CatalogManager {
    pub fn new(
        products: Arc<dyn ProductRepository>,
        categories: Arc<dyn CategoryRepository>,
        prefs: Arc<PreferenceStore>,
    ) -> Self {
        Self { products, categories, prefs }
    }
}

#[async_trait]
impl CatalogService for CatalogManager {
    async fn product(&self, id: &str) -> AppResult<Product> {
        self.products.find_by_id(id).await?.ok_or(AppError::NotFound)
    }

    async fn products(&self) -> AppResult<Vec<Product>> {
        self.products.list().await
    }

    async fn products_in_category(&self, category_id: &str) -> AppResult<Vec<Product>> {
        self.products.list_by_category(category_id).await
    }

    async fn search(&self, raw_query: &str, sort: SortOrder) -> AppResult<Vec<Product>> {
        let all = self.products.list().await?;
        let results = filter_and_sort(&all, raw_query, sort);

        if !raw_query.trim().is_empty() {
            // History bookkeeping never fails a search
            if let Err(e) = self.prefs.push_recent_search(raw_query).await {
                tracing::warn!("Recent-search bookkeeping failed: {}", e);
            }
        }

        Ok(results)
    }

    async fn category_pages(&self) -> AppResult<Vec<Vec<Category>>> {
        let categories = self.categories.list().await?;
        Ok(paginate(&categories, CATEGORY_PAGE_SIZE))
    }

    async fn create_product(&self, payload: CreateProduct) -> AppResult<Product> {
        payload.validate()?;
        self.products.create(payload).await
    }

    async fn update_product(&self, id: &str, changes: UpdateProduct) -> AppResult<Product> {
        changes.validate()?;
        self.products.update(id, changes).await
    }

    async fn delete_product(&self, id: &str) -> AppResult<()> {
        self.products.delete(id).await
    }

    async fn create_category(&self, payload: CreateCategory) -> AppResult<Category> {
        payload.validate()?;
        self.categories.create(payload).await
    }

    async fn update_category(&self, id: &str, changes: UpdateCategory) -> AppResult<Category> {
        changes.validate()?;
        self.categories.update(id, changes).await
    }

    async fn delete_category(&self, id: &str) -> AppResult<()> {
        self.categories.delete(id).await
    }
}
