//! Cart line items and total bookkeeping.

use serde::{Deserialize, Serialize};

use crate::utils::lenient_price;

/// A cart line, keyed by `(user_id, product_id)`.
///
/// Name, price and image are denormalized snapshots taken when the line was
/// first created; later catalog edits do not reach into existing carts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    pub id: String,
    pub user_id: String,
    pub product_id: String,
    pub name: String,
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: f64,
    #[serde(default)]
    pub image_url: Option<String>,
    pub quantity: u32,
}

impl CartItem {
    /// Line contribution to the cart total.
    pub fn line_total(&self) -> f64 {
        self.price * self.quantity as f64
    }

    /// Quantity after applying `delta`, or `None` when the result would
    /// drop below one (the line must be removed explicitly instead).
    pub fn adjusted_quantity(&self, delta: i64) -> Option<u32> {
        let next = self.quantity as i64 + delta;
        if next < 1 {
            None
        } else {
            Some(next as u32)
        }
    }
}

/// Sum of `quantity * price` over all lines.
pub fn cart_total(lines: &[CartItem]) -> f64 {
    lines.iter().map(CartItem::line_total).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(price: f64, quantity: u32) -> CartItem {
        CartItem {
            id: format!("l-{}", quantity),
            user_id: "u1".into(),
            product_id: "p1".into(),
            name: "B\u{00e1}nh bao".into(),
            price,
            image_url: None,
            quantity,
        }
    }

    #[test]
    fn total_sums_quantity_times_price() {
        let lines = vec![line(10000.0, 2), line(25000.0, 1)];
        assert_eq!(cart_total(&lines), 45000.0);
    }

    #[test]
    fn quantity_never_drops_below_one() {
        let l = line(10000.0, 1);
        assert_eq!(l.adjusted_quantity(-1), None);
        assert_eq!(l.adjusted_quantity(1), Some(2));
        let l = line(10000.0, 3);
        assert_eq!(l.adjusted_quantity(-2), Some(1));
    }

    #[test]
    fn unparsable_price_contributes_zero() {
        let doc = serde_json::json!({
            "id": "l1",
            "user_id": "u1",
            "product_id": "p1",
            "name": "Tart",
            "price": "call us",
            "quantity": 2,
        });
        let l: CartItem = serde_json::from_value(doc).unwrap();
        assert_eq!(l.line_total(), 0.0);
    }
}
