//! Account roles, session snapshots and delivery addresses.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::config::{PHONE_PATTERN, ROLE_ADMIN, ROLE_CUSTOMER};

/// Account roles enumeration.
///
/// Role-dependent behavior dispatches on this closed enum; the raw strings
/// only exist at the storage and auth-service boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Customer,
    Admin,
}

impl UserRole {
    /// Check if this role has admin privileges
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

impl From<&str> for UserRole {
    fn from(s: &str) -> Self {
        match s {
            ROLE_ADMIN => UserRole::Admin,
            _ => UserRole::Customer,
        }
    }
}

impl From<String> for UserRole {
    fn from(s: String) -> Self {
        UserRole::from(s.as_str())
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Admin => write!(f, "{}", ROLE_ADMIN),
            UserRole::Customer => write!(f, "{}", ROLE_CUSTOMER),
        }
    }
}

/// Signed-in user snapshot, persisted to the local preference store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub email: String,
    pub role: UserRole,
}

/// Saved delivery address; one per user, overwritten on each save.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    pub user_id: String,
    pub recipient_name: String,
    pub phone: String,
    pub detail: String,
}

/// Address save payload.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SaveAddress {
    #[validate(length(min = 1, message = "Recipient name is required"))]
    pub recipient_name: String,
    #[validate(regex(path = *PHONE_PATTERN, message = "Phone number must be 10-11 digits"))]
    pub phone: String,
    #[validate(length(min = 1, message = "Address is required"))]
    pub detail: String,
}
