//! Bakehouse core - catalog, cart and order lifecycle for a bakery
//! storefront and its admin console.
//!
//! This crate is the logic layer invoked by UI event handlers; it owns no
//! screens and no wire surface of its own. Remote collaborators (the
//! hosted document database, the authentication service and the text
//! completion endpoint) sit behind traits in [`infra`].
//!
//! # Architecture Layers
//!
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities and the order state machine
//! - **search**: Text normalization, relevance scoring and ordering
//! - **browse**: Category paging and the scrollbar mapping
//! - **services**: Application use cases and business logic
//! - **infra**: Remote collaborators and local preference storage
//! - **jobs**: Recurring read-only background feeds
//! - **utils**: Utility functions and helpers
//! - **errors**: Centralized error handling

pub mod browse;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod jobs;
pub mod search;
pub mod services;
pub mod utils;

// Re-export commonly used types at crate root
pub use config::Config;
pub use domain::{Order, OrderStatus, Product, Session, UserRole};
pub use errors::{AppError, AppResult};
pub use services::{ServiceContainer, Services};
