//! Cart service unit tests.

use std::sync::Arc;

use chrono::Utc;
use mockall::predicate::eq;

use bakehouse::domain::{CartItem, Product};
use bakehouse::errors::AppError;
use bakehouse::infra::repositories::{MockCartRepository, MockProductRepository};
use bakehouse::services::{CartManager, CartService};

fn test_product(id: &str, stock: Option<u32>) -> Product {
    Product {
        id: id.to_string(),
        name: "B\u{00e1}nh m\u{00ec} th\u{1ecb}t".to_string(),
        description: None,
        price: 25000.0,
        stock,
        category_id: "banh-man".to_string(),
        image_url: None,
        rating_sum: 0.0,
        review_count: 0,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn test_line(id: &str, price: f64, quantity: u32) -> CartItem {
    CartItem {
        id: id.to_string(),
        user_id: "u1".to_string(),
        product_id: "p1".to_string(),
        name: "B\u{00e1}nh m\u{00ec} th\u{1ecb}t".to_string(),
        price,
        image_url: None,
        quantity,
    }
}

#[tokio::test]
async fn test_add_to_cart_requires_sign_in() {
    let carts = MockCartRepository::new();
    let products = MockProductRepository::new();

    let service = CartManager::new(Arc::new(carts), Arc::new(products));
    let result = service.add_to_cart(None, "p1", 1).await;

    assert!(matches!(result.unwrap_err(), AppError::Unauthorized));
}

#[tokio::test]
async fn test_add_to_cart_rejects_sold_out_product() {
    let carts = MockCartRepository::new();
    let mut products = MockProductRepository::new();
    products
        .expect_find_by_id()
        .with(eq("p1"))
        .returning(|id| Ok(Some(test_product(id, Some(0)))));

    let service = CartManager::new(Arc::new(carts), Arc::new(products));
    let result = service.add_to_cart(Some("u1"), "p1", 1).await;

    assert!(matches!(result.unwrap_err(), AppError::OutOfStock));
}

#[tokio::test]
async fn test_repeat_add_increments_existing_line() {
    let mut carts = MockCartRepository::new();
    let mut products = MockProductRepository::new();

    products
        .expect_find_by_id()
        .returning(|id| Ok(Some(test_product(id, Some(10)))));
    carts
        .expect_find_line()
        .with(eq("u1"), eq("p1"))
        .returning(|_, _| Ok(Some(test_line("l1", 25000.0, 2))));
    carts
        .expect_set_quantity()
        .with(eq("l1"), eq(5u32))
        .times(1)
        .returning(|_, _| Ok(()));

    let service = CartManager::new(Arc::new(carts), Arc::new(products));
    let line = service.add_to_cart(Some("u1"), "p1", 3).await.unwrap();

    assert_eq!(line.quantity, 5);
}

#[tokio::test]
async fn test_first_add_snapshots_product_and_caps_at_stock() {
    let mut carts = MockCartRepository::new();
    let mut products = MockProductRepository::new();

    products
        .expect_find_by_id()
        .returning(|id| Ok(Some(test_product(id, Some(2)))));
    carts.expect_find_line().returning(|_, _| Ok(None));
    carts
        .expect_create()
        .withf(|line: &CartItem| {
            line.product_id == "p1"
                && line.name == "B\u{00e1}nh m\u{00ec} th\u{1ecb}t"
                && line.price == 25000.0
                && line.quantity == 2
        })
        .times(1)
        .returning(|_| Ok(()));

    let service = CartManager::new(Arc::new(carts), Arc::new(products));
    let line = service.add_to_cart(Some("u1"), "p1", 5).await.unwrap();

    assert_eq!(line.quantity, 2);
}

#[tokio::test]
async fn test_update_quantity_refuses_to_drop_below_one() {
    // No set_quantity expectation: a persisted write would fail the test
    let carts = MockCartRepository::new();
    let products = MockProductRepository::new();

    let service = CartManager::new(Arc::new(carts), Arc::new(products));
    let line = test_line("l1", 25000.0, 1);
    let quantity = service.update_quantity(&line, -1).await.unwrap();

    assert_eq!(quantity, 1);
}

#[tokio::test]
async fn test_update_quantity_persists_valid_change() {
    let mut carts = MockCartRepository::new();
    let products = MockProductRepository::new();
    carts
        .expect_set_quantity()
        .with(eq("l1"), eq(3u32))
        .times(1)
        .returning(|_, _| Ok(()));

    let service = CartManager::new(Arc::new(carts), Arc::new(products));
    let line = test_line("l1", 25000.0, 2);
    let quantity = service.update_quantity(&line, 1).await.unwrap();

    assert_eq!(quantity, 3);
}

#[tokio::test]
async fn test_cart_total_sums_lines() {
    let mut carts = MockCartRepository::new();
    let products = MockProductRepository::new();
    carts.expect_list_for_user().with(eq("u1")).returning(|_| {
        Ok(vec![test_line("l1", 10000.0, 2), test_line("l2", 25000.0, 1)])
    });

    let service = CartManager::new(Arc::new(carts), Arc::new(products));
    let view = service.cart("u1").await.unwrap();

    assert_eq!(view.total, 45000.0);
    assert_eq!(view.lines.len(), 2);
}
