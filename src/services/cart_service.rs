//! Cart service - quantity bookkeeping over the cart repository.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{cart_total, CartItem};
use crate::errors::{AppError, AppResult};
use crate::infra::{CartRepository, ProductRepository};

/// A user's cart with its running total.
#[derive(Debug, Clone)]
pub struct CartView {
    pub lines: Vec<CartItem>,
    pub total: f64,
}

/// Cart service trait for dependency injection.
#[async_trait]
pub trait CartService: Send + Sync {
    /// Add `quantity` of a product to the user's cart, incrementing an
    /// existing line or creating one with a catalog snapshot. Requires a
    /// signed-in user and a product that is not sold out.
    async fn add_to_cart(
        &self,
        user_id: Option<&str>,
        product_id: &str,
        quantity: u32,
    ) -> AppResult<CartItem>;

    /// Apply `delta` to a line's quantity. Quantities never drop below
    /// one; such a request leaves the line untouched. Returns the
    /// effective quantity.
    async fn update_quantity(&self, line: &CartItem, delta: i64) -> AppResult<u32>;

    /// Remove a line outright.
    async fn remove_line(&self, line: &CartItem) -> AppResult<()>;

    /// The user's cart lines with their total.
    async fn cart(&self, user_id: &str) -> AppResult<CartView>;
}

/// Concrete implementation of CartService
pub struct CartManager {
    carts: Arc<dyn CartRepository>,
    products: Arc<dyn ProductRepository>,
}

impl CartManager {
    pub fn new(carts: Arc<dyn CartRepository>, products: Arc<dyn ProductRepository>) -> Self {
        Self { carts, products }
    }
}

#[async_trait]
impl CartService for CartManager {
    async fn add_to_cart(
        &self,
        user_id: Option<&str>,
        product_id: &str,
        quantity: u32,
    ) -> AppResult<CartItem> {
        let user_id = user_id.ok_or(AppError::Unauthorized)?;
        if quantity == 0 {
            return Err(AppError::validation("Quantity must be at least 1"));
        }

        let product = self
            .products
            .find_by_id(product_id)
            .await?
            .ok_or(AppError::NotFound)?;
        if product.stock == Some(0) {
            return Err(AppError::OutOfStock);
        }

        if let Some(mut line) = self.carts.find_line(user_id, product_id).await? {
            line.quantity += quantity;
            self.carts.set_quantity(&line.id, line.quantity).await?;
            return Ok(line);
        }

        // First add: snapshot name, price and image; cap at finite stock
        let capped = product.stock.map_or(quantity, |s| quantity.min(s));
        let line = CartItem {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            product_id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            image_url: product.image_url.clone(),
            quantity: capped,
        };
        self.carts.create(line.clone()).await?;
        Ok(line)
    }

    async fn update_quantity(&self, line: &CartItem, delta: i64) -> AppResult<u32> {
        match line.adjusted_quantity(delta) {
            Some(next) => {
                self.carts.set_quantity(&line.id, next).await?;
                Ok(next)
            }
            None => Ok(line.quantity),
        }
    }

    async fn remove_line(&self, line: &CartItem) -> AppResult<()> {
        self.carts.delete(&line.id).await
    }

    async fn cart(&self, user_id: &str) -> AppResult<CartView> {
        let lines = self.carts.list_for_user(user_id).await?;
        let total = cart_total(&lines);
        Ok(CartView { lines, total })
    }
}
