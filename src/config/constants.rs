//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

use once_cell::sync::Lazy;
use regex::Regex;

// =============================================================================
// Roles
// =============================================================================

/// Default role assigned to new accounts
pub const ROLE_CUSTOMER: &str = "customer";

/// Administrator role with console access
pub const ROLE_ADMIN: &str = "admin";

// =============================================================================
// Catalog browsing
// =============================================================================

/// Number of categories shown per horizontally paged screen
pub const CATEGORY_PAGE_SIZE: usize = 8;

// =============================================================================
// Validation
// =============================================================================

/// Recipient phone numbers are plain digit strings of 10 or 11 digits
pub static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{10,11}$").expect("phone pattern is valid"));

// =============================================================================
// Local preferences
// =============================================================================

/// Bounded most-recent-first search history
pub const RECENT_SEARCH_CAP: usize = 10;

// =============================================================================
// Assistant
// =============================================================================

/// Sentinel line the completion endpoint is instructed to emit before
/// enumerating suggested product names, one per line.
pub const ASSISTANT_PRODUCTS_SENTINEL: &str = "PRODUCTS:";

// =============================================================================
// Background feed
// =============================================================================

/// Default interval between pending-order count re-fetches, in seconds
pub const DEFAULT_FEED_INTERVAL_SECS: u64 = 30;

// =============================================================================
// Collection names at the document store
// =============================================================================

pub const COLLECTION_PRODUCTS: &str = "products";
pub const COLLECTION_CATEGORIES: &str = "categories";
pub const COLLECTION_CART_ITEMS: &str = "cart_items";
pub const COLLECTION_ORDERS: &str = "orders";
pub const COLLECTION_REVIEWS: &str = "reviews";
pub const COLLECTION_ADDRESSES: &str = "addresses";
