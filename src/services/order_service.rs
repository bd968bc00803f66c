//! Order service - placement and lifecycle transitions.
//!
//! Placement is a sequence of independent writes against the store
//! (create order, decrement stocks, clear cart). A failure partway
//! abandons the remaining steps; earlier side effects stay applied.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::domain::{order_total, Actor, CheckoutDetails, Order, OrderLine, OrderStatus};
use crate::errors::{AppError, AppResult};
use crate::infra::{CartRepository, OrderRepository, ProductRepository};

/// Order service trait for dependency injection.
#[async_trait]
pub trait OrderService: Send + Sync {
    /// Check out the user's whole cart; the cart is emptied afterwards.
    async fn place_from_cart(&self, user_id: &str, details: CheckoutDetails) -> AppResult<Order>;

    /// Direct "buy now" for a single product; the cart is left alone.
    async fn buy_now(
        &self,
        user_id: &str,
        product_id: &str,
        quantity: u32,
        details: CheckoutDetails,
    ) -> AppResult<Order>;

    /// Drive the status state machine. Customers may only act on their
    /// own orders; the transition table itself lives in the domain.
    async fn transition(
        &self,
        order_id: &str,
        next: OrderStatus,
        actor: Actor,
        acting_user: &str,
    ) -> AppResult<Order>;

    /// A customer's order history, newest first.
    async fn orders_for_user(&self, user_id: &str) -> AppResult<Vec<Order>>;

    /// Admin console listing by state, newest first.
    async fn orders_by_status(&self, status: OrderStatus) -> AppResult<Vec<Order>>;
}

/// Concrete implementation of OrderService
pub struct OrderManager {
    orders: Arc<dyn OrderRepository>,
    products: Arc<dyn ProductRepository>,
    carts: Arc<dyn CartRepository>,
}

impl OrderManager {
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        products: Arc<dyn ProductRepository>,
        carts: Arc<dyn CartRepository>,
    ) -> Self {
        Self { orders, products, carts }
    }

    /// Persist the order, then decrement stock line by line. Steps are
    /// independent writes; nothing is rolled back on a later failure.
    /// Recipient details are already validated by the callers.
    async fn place(
        &self,
        user_id: &str,
        lines: Vec<OrderLine>,
        details: CheckoutDetails,
        clear_cart: bool,
    ) -> AppResult<Order> {
        if lines.is_empty() {
            return Err(AppError::validation("There is nothing to order"));
        }

        let now = Utc::now();
        let order = Order {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            recipient_name: details.recipient_name,
            phone: details.phone,
            address: details.address,
            total: order_total(&lines),
            lines,
            status: OrderStatus::Pending,
            payment_method: details.payment_method,
            payment_proof_url: details.payment_proof_url,
            created_at: now,
            updated_at: now,
        };

        self.orders.create(order.clone()).await?;

        for line in &order.lines {
            if let Err(e) = self
                .products
                .decrement_stock(&line.product_id, line.quantity)
                .await
            {
                tracing::error!(
                    order_id = %order.id,
                    product_id = %line.product_id,
                    "Stock decrement failed, abandoning placement: {}",
                    e
                );
                return Err(e);
            }
        }

        if clear_cart {
            self.carts.clear_for_user(user_id).await?;
        }

        tracing::info!(order_id = %order.id, total = order.total, "Order placed");
        Ok(order)
    }
}

#[async_trait]
impl OrderService for OrderManager {
    async fn place_from_cart(&self, user_id: &str, details: CheckoutDetails) -> AppResult<Order> {
        // Local validation happens before any remote call
        details.validate()?;

        let cart_lines = self.carts.list_for_user(user_id).await?;
        let lines: Vec<OrderLine> = cart_lines.iter().map(OrderLine::from).collect();
        self.place(user_id, lines, details, true).await
    }

    async fn buy_now(
        &self,
        user_id: &str,
        product_id: &str,
        quantity: u32,
        details: CheckoutDetails,
    ) -> AppResult<Order> {
        details.validate()?;
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

        let line = OrderLine {
            product_id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            quantity,
            image_url: product.image_url.clone(),
        };
        self.place(user_id, vec![line], details, false).await
    }

    async fn transition(
        &self,
        order_id: &str,
        next: OrderStatus,
        actor: Actor,
        acting_user: &str,
    ) -> AppResult<Order> {
        let mut order = self
            .orders
            .find_by_id(order_id)
            .await?
            .ok_or(AppError::NotFound)?;

        if actor == Actor::Customer && order.user_id != acting_user {
            return Err(AppError::Forbidden);
        }
        if !order.status.can_transition(next, actor) {
            return Err(AppError::InvalidTransition { from: order.status, to: next });
        }

        self.orders.set_status(order_id, next).await?;
        order.status = next;
        order.updated_at = Utc::now();

        tracing::info!(order_id = %order.id, status = %next, "Order transitioned");
        Ok(order)
    }

    async fn orders_for_user(&self, user_id: &str) -> AppResult<Vec<Order>> {
        self.orders.list_for_user(user_id).await
    }

    async fn orders_by_status(&self, status: OrderStatus) -> AppResult<Vec<Order>> {
        self.orders.list_by_status(status).await
    }
}
