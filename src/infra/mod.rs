//! Infrastructure concerns: remote collaborators and local persistence.

pub mod assistant_client;
pub mod auth_provider;
pub mod docstore;
pub mod prefs;
pub mod repositories;

pub use assistant_client::{CompletionClient, RestCompletionClient};
pub use auth_provider::{AuthProvider, AuthUser, RestAuthProvider};
pub use docstore::{DocumentStore, Filter, MemoryStore, OrderBy, RestStore};
pub use prefs::PreferenceStore;
pub use repositories::{
    AddressCollection, AddressRepository, CartCollection, CartRepository, CategoryCollection,
    CategoryRepository, OrderCollection, OrderRepository, ProductCollection, ProductRepository,
    ReviewCollection, ReviewRepository,
};

#[cfg(any(test, feature = "test-utils"))]
pub use assistant_client::MockCompletionClient;
#[cfg(any(test, feature = "test-utils"))]
pub use auth_provider::MockAuthProvider;
