//! Order snapshot and its status state machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::config::PHONE_PATTERN;
use crate::domain::cart::CartItem;
use crate::utils::lenient_price;

/// Order lifecycle states.
///
/// `Completed` and `Cancelled` are terminal; no transition leaves them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Completed,
    Cancelled,
}

/// Who is asking for a transition. Customers may only act on their own
/// orders; that ownership check lives in the order service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    Customer,
    Admin,
}

impl OrderStatus {
    /// Whether any transition is defined out of this state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// The transition table:
    /// - pending -> processing: admin confirms the order
    /// - pending -> cancelled: owning customer or admin
    /// - processing -> completed: owning customer confirms receipt, or admin
    /// - processing -> cancelled: admin only
    pub fn can_transition(self, next: OrderStatus, actor: Actor) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next, actor),
            (Pending, Processing, Actor::Admin)
                | (Pending, Cancelled, _)
                | (Processing, Completed, _)
                | (Processing, Cancelled, Actor::Admin)
        )
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        };
        write!(f, "{}", s)
    }
}

/// One product-quantity-price snapshot inside an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: String,
    pub name: String,
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: f64,
    pub quantity: u32,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl From<&CartItem> for OrderLine {
    fn from(item: &CartItem) -> Self {
        Self {
            product_id: item.product_id.clone(),
            name: item.name.clone(),
            price: item.price,
            quantity: item.quantity,
            image_url: item.image_url.clone(),
        }
    }
}

/// A placed order.
///
/// Recipient details and line items are immutable snapshots taken at
/// placement; `total` is computed once and never recalculated, even if
/// catalog prices change later. Status transitions touch only `status`
/// and `updated_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub user_id: String,
    pub recipient_name: String,
    pub phone: String,
    pub address: String,
    pub lines: Vec<OrderLine>,
    pub total: f64,
    pub status: OrderStatus,
    pub payment_method: String,
    #[serde(default)]
    pub payment_proof_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Whether the order contains the given product.
    pub fn contains_product(&self, product_id: &str) -> bool {
        self.lines.iter().any(|l| l.product_id == product_id)
    }
}

/// Sum of `price * quantity` over the snapshot lines.
pub fn order_total(lines: &[OrderLine]) -> f64 {
    lines.iter().map(|l| l.price * l.quantity as f64).sum()
}

/// Recipient details validated before any remote write at placement.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CheckoutDetails {
    #[validate(length(min = 1, message = "Recipient name is required"))]
    pub recipient_name: String,
    #[validate(regex(path = *PHONE_PATTERN, message = "Phone number must be 10-11 digits"))]
    pub phone: String,
    #[validate(length(min = 1, message = "Delivery address is required"))]
    pub address: String,
    #[validate(length(min = 1, message = "Payment method is required"))]
    pub payment_method: String,
    pub payment_proof_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use OrderStatus::*;

    #[test]
    fn transition_table_matches_lifecycle() {
        // Reachable paths
        assert!(Pending.can_transition(Processing, Actor::Admin));
        assert!(Pending.can_transition(Cancelled, Actor::Customer));
        assert!(Pending.can_transition(Cancelled, Actor::Admin));
        assert!(Processing.can_transition(Completed, Actor::Customer));
        assert!(Processing.can_transition(Completed, Actor::Admin));
        assert!(Processing.can_transition(Cancelled, Actor::Admin));

        // Customers never confirm or cancel a processing order themselves
        assert!(!Pending.can_transition(Processing, Actor::Customer));
        assert!(!Processing.can_transition(Cancelled, Actor::Customer));

        // Terminal states stay terminal
        for next in [Pending, Processing, Completed, Cancelled] {
            for actor in [Actor::Customer, Actor::Admin] {
                assert!(!Completed.can_transition(next, actor));
                assert!(!Cancelled.can_transition(next, actor));
            }
        }

        // No skipping straight to completed
        assert!(!Pending.can_transition(Completed, Actor::Admin));
    }

    #[test]
    fn totals_come_from_snapshot_lines() {
        let lines = vec![
            OrderLine {
                product_id: "a".into(),
                name: "B\u{00e1}nh kem".into(),
                price: 10000.0,
                quantity: 2,
                image_url: None,
            },
            OrderLine {
                product_id: "b".into(),
                name: "B\u{00e1}nh su".into(),
                price: 25000.0,
                quantity: 1,
                image_url: None,
            },
        ];
        assert_eq!(order_total(&lines), 45000.0);
    }
}
