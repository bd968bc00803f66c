//! Saved-address repository over the document store.
//!
//! One address per user, keyed by the user id and overwritten on save.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::config::COLLECTION_ADDRESSES;
use crate::domain::Address;
use crate::errors::AppResult;
use crate::infra::docstore::DocumentStore;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Address repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AddressRepository: Send + Sync {
    /// The user's saved address, if any
    async fn find_for_user(&self, user_id: &str) -> AppResult<Option<Address>>;

    /// Save the address, replacing any previous one
    async fn save(&self, address: Address) -> AppResult<()>;
}

/// Concrete implementation of AddressRepository
pub struct AddressCollection {
    store: Arc<dyn DocumentStore>,
}

impl AddressCollection {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

fn decode(document: Value) -> AppResult<Address> {
    Ok(serde_json::from_value(document)?)
}

#[async_trait]
impl AddressRepository for AddressCollection {
    async fn find_for_user(&self, user_id: &str) -> AppResult<Option<Address>> {
        let document = self.store.get(COLLECTION_ADDRESSES, user_id).await?;
        document.map(decode).transpose()
    }

    async fn save(&self, address: Address) -> AppResult<()> {
        let document = serde_json::to_value(&address)?;
        let existing = self.store.get(COLLECTION_ADDRESSES, &address.user_id).await?;

        if existing.is_some() {
            let fields = document
                .as_object()
                .cloned()
                .unwrap_or_default();
            self.store
                .update(COLLECTION_ADDRESSES, &address.user_id, fields)
                .await
        } else {
            self.store
                .insert(COLLECTION_ADDRESSES, &address.user_id, document)
                .await
        }
    }
}
