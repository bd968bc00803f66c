//! Typed repositories over the document store.
//!
//! Each aggregate gets a trait (mockable in tests) and a `*Collection`
//! implementation that handles encoding and collection naming.

pub mod address_repository;
pub mod cart_repository;
pub mod category_repository;
pub mod order_repository;
pub mod product_repository;
pub mod review_repository;

pub use address_repository::{AddressCollection, AddressRepository};
pub use cart_repository::{CartCollection, CartRepository};
pub use category_repository::{CategoryCollection, CategoryRepository};
pub use order_repository::{OrderCollection, OrderRepository};
pub use product_repository::{ProductCollection, ProductRepository};
pub use review_repository::{ReviewCollection, ReviewRepository};

#[cfg(any(test, feature = "test-utils"))]
pub use address_repository::MockAddressRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use cart_repository::MockCartRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use category_repository::MockCategoryRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use order_repository::MockOrderRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use product_repository::MockProductRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use review_repository::MockReviewRepository;
