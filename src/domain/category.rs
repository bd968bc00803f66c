//! Category entity and admin-side payloads.
//!
//! Categories have a lifecycle independent from products: deleting a
//! category leaves the products that reference it in place.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Catalog category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Admin payload for creating a category.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCategory {
    #[validate(length(min = 1, message = "Category name is required"))]
    pub name: String,
    pub image_url: Option<String>,
}

/// Admin payload for updating a category.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateCategory {
    #[validate(length(min = 1, message = "Category name cannot be empty"))]
    pub name: Option<String>,
    pub image_url: Option<String>,
}
