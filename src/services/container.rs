//! Service container - centralized service access.
//!
//! Depends on service traits, not implementations, so composition roots
//! and tests can swap any piece.

use std::sync::Arc;

use super::{
    AssistantManager, AssistantService, AuthService, Authenticator, CartManager, CartService,
    CatalogManager, CatalogService, OrderManager, OrderService, ProfileManager, ProfileService,
    ReviewManager, ReviewService,
};
use crate::infra::{
    AddressCollection, AuthProvider, CartCollection, CategoryCollection, CompletionClient,
    DocumentStore, OrderCollection, PreferenceStore, ProductCollection, ReviewCollection,
};

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;
    fn profile(&self) -> Arc<dyn ProfileService>;
    fn catalog(&self) -> Arc<dyn CatalogService>;
    fn cart(&self) -> Arc<dyn CartService>;
    fn orders(&self) -> Arc<dyn OrderService>;
    fn reviews(&self) -> Arc<dyn ReviewService>;
    fn assistant(&self) -> Arc<dyn AssistantService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth: Arc<dyn AuthService>,
    profile: Arc<dyn ProfileService>,
    catalog: Arc<dyn CatalogService>,
    cart: Arc<dyn CartService>,
    orders: Arc<dyn OrderService>,
    reviews: Arc<dyn ReviewService>,
    assistant: Arc<dyn AssistantService>,
}

impl Services {
    /// Wire every service over a document store and the remote
    /// collaborators.
    pub fn from_parts(
        store: Arc<dyn DocumentStore>,
        provider: Arc<dyn AuthProvider>,
        completions: Arc<dyn CompletionClient>,
        prefs: Arc<PreferenceStore>,
    ) -> Self {
        let products = Arc::new(ProductCollection::new(store.clone()));
        let categories = Arc::new(CategoryCollection::new(store.clone()));
        let carts = Arc::new(CartCollection::new(store.clone()));
        let orders = Arc::new(OrderCollection::new(store.clone()));
        let reviews = Arc::new(ReviewCollection::new(store.clone()));
        let addresses = Arc::new(AddressCollection::new(store));

        Self {
            auth: Arc::new(Authenticator::new(provider, prefs.clone())),
            profile: Arc::new(ProfileManager::new(addresses)),
            catalog: Arc::new(CatalogManager::new(products.clone(), categories, prefs)),
            cart: Arc::new(CartManager::new(carts.clone(), products.clone())),
            orders: Arc::new(OrderManager::new(orders.clone(), products.clone(), carts)),
            reviews: Arc::new(ReviewManager::new(reviews, orders, products.clone())),
            assistant: Arc::new(AssistantManager::new(completions, products)),
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth.clone()
    }

    fn profile(&self) -> Arc<dyn ProfileService> {
        self.profile.clone()
    }

    fn catalog(&self) -> Arc<dyn CatalogService> {
        self.catalog.clone()
    }

    fn cart(&self) -> Arc<dyn CartService> {
        self.cart.clone()
    }

    fn orders(&self) -> Arc<dyn OrderService> {
        self.orders.clone()
    }

    fn reviews(&self) -> Arc<dyn ReviewService> {
        self.reviews.clone()
    }

    fn assistant(&self) -> Arc<dyn AssistantService> {
        self.assistant.clone()
    }
}
