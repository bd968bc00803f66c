//! Profile service - the user's saved delivery address.

use std::sync::Arc;

use async_trait::async_trait;
use validator::Validate;

use crate::domain::{Address, SaveAddress};
use crate::errors::AppResult;
use crate::infra::AddressRepository;

/// Profile service trait for dependency injection.
#[async_trait]
pub trait ProfileService: Send + Sync {
    /// The saved address checkout screens prefill from, if any
    async fn saved_address(&self, user_id: &str) -> AppResult<Option<Address>>;

    /// Save the address, overwriting any previous one
    async fn save_address(&self, user_id: &str, payload: SaveAddress) -> AppResult<Address>;
}

/// Concrete implementation of ProfileService
pub struct ProfileManager {
    addresses: Arc<dyn AddressRepository>,
}

impl ProfileManager {
    pub fn new(addresses: Arc<dyn AddressRepository>) -> Self {
        Self { addresses }
    }
}

#[async_trait]
impl ProfileService for ProfileManager {
    async fn saved_address(&self, user_id: &str) -> AppResult<Option<Address>> {
        self.addresses.find_for_user(user_id).await
    }

    async fn save_address(&self, user_id: &str, payload: SaveAddress) -> AppResult<Address> {
        payload.validate()?;

        let address = Address {
            user_id: user_id.to_string(),
            recipient_name: payload.recipient_name,
            phone: payload.phone,
            detail: payload.detail,
        };
        self.addresses.save(address.clone()).await?;
        Ok(address)
    }
}
