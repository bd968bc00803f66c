//! End-to-end storefront flow over the in-memory document store: seed a
//! catalog, browse, fill a cart, place an order, walk the lifecycle and
//! leave a review.

use std::sync::Arc;

use bakehouse::config::CATEGORY_PAGE_SIZE;
use bakehouse::domain::{
    Actor, CheckoutDetails, CreateCategory, CreateProduct, OrderStatus, SubmitReview,
};
use bakehouse::errors::AppError;
use bakehouse::infra::{MemoryStore, MockAuthProvider, MockCompletionClient, PreferenceStore};
use bakehouse::search::SortOrder;
use bakehouse::services::{ServiceContainer, Services};

fn checkout() -> CheckoutDetails {
    CheckoutDetails {
        recipient_name: "Lan Pham".to_string(),
        phone: "0912345678".to_string(),
        address: "12 Hang Bong, Ha Noi".to_string(),
        payment_method: "cod".to_string(),
        payment_proof_url: None,
    }
}

async fn test_services(name: &str) -> (Services, std::path::PathBuf) {
    let prefs_path = std::env::temp_dir().join(format!(
        "bakehouse-flow-{}-{}.json",
        name,
        uuid::Uuid::new_v4()
    ));
    let services = Services::from_parts(
        Arc::new(MemoryStore::new()),
        Arc::new(MockAuthProvider::new()),
        Arc::new(MockCompletionClient::new()),
        Arc::new(PreferenceStore::open(&prefs_path).await),
    );
    (services, prefs_path)
}

#[tokio::test]
async fn test_category_strip_pages_preserve_order() {
    let (services, prefs_path) = test_services("paging").await;
    let catalog = services.catalog();

    let mut created = Vec::new();
    for i in 0..20 {
        let category = catalog
            .create_category(CreateCategory {
                name: format!("category {:02}", i),
                image_url: None,
            })
            .await
            .unwrap();
        created.push(category.id);
    }

    let pages = catalog.category_pages().await.unwrap();
    let lengths: Vec<_> = pages.iter().map(Vec::len).collect();
    assert_eq!(lengths, vec![CATEGORY_PAGE_SIZE, CATEGORY_PAGE_SIZE, 4]);

    // Concatenating the pages loses nothing and invents nothing
    let rejoined: Vec<String> = pages
        .into_iter()
        .flatten()
        .map(|c| c.id)
        .collect();
    let mut expected = created.clone();
    expected.sort();
    let mut actual = rejoined.clone();
    actual.sort();
    assert_eq!(actual, expected);

    // Page boundaries are stable across fetches
    let again: Vec<String> = catalog
        .category_pages()
        .await
        .unwrap()
        .into_iter()
        .flatten()
        .map(|c| c.id)
        .collect();
    assert_eq!(again, rejoined);

    let _ = tokio::fs::remove_file(&prefs_path).await;
}

#[tokio::test]
async fn test_search_is_diacritic_insensitive_and_records_history() {
    let (services, prefs_path) = test_services("search").await;
    let catalog = services.catalog();

    let category = catalog
        .create_category(CreateCategory { name: "B\u{00e1}nh".to_string(), image_url: None })
        .await
        .unwrap();
    for (name, price) in [("B\u{00e1}nh M\u{00ec}", 25000.0), ("M\u{00ec} Vi\u{1ec7}t", 30000.0), ("Donut", 15000.0)] {
        catalog
            .create_product(CreateProduct {
                name: name.to_string(),
                description: None,
                price,
                stock: Some(10),
                category_id: category.id.clone(),
                image_url: None,
            })
            .await
            .unwrap();
    }

    let hits = catalog.search("mi", SortOrder::Relevance).await.unwrap();
    let names: Vec<_> = hits.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["M\u{00ec} Vi\u{1ec7}t", "B\u{00e1}nh M\u{00ec}"]);

    let prefs = PreferenceStore::open(&prefs_path).await;
    assert_eq!(prefs.recent_searches().await, vec!["mi".to_string()]);

    let _ = tokio::fs::remove_file(&prefs_path).await;
}

#[tokio::test]
async fn test_cart_to_completed_order_with_stock_decrement() {
    let (services, prefs_path) = test_services("lifecycle").await;
    let catalog = services.catalog();
    let cart = services.cart();
    let orders = services.orders();

    let category = catalog
        .create_category(CreateCategory { name: "B\u{00e1}nh ng\u{1ecd}t".to_string(), image_url: None })
        .await
        .unwrap();
    let product_a = catalog
        .create_product(CreateProduct {
            name: "B\u{00e1}nh kem".to_string(),
            description: None,
            price: 10000.0,
            stock: Some(5),
            category_id: category.id.clone(),
            image_url: None,
        })
        .await
        .unwrap();
    let product_b = catalog
        .create_product(CreateProduct {
            name: "B\u{00e1}nh su".to_string(),
            description: None,
            price: 25000.0,
            stock: Some(1),
            category_id: category.id,
            image_url: None,
        })
        .await
        .unwrap();

    cart.add_to_cart(Some("u1"), &product_a.id, 2).await.unwrap();
    cart.add_to_cart(Some("u1"), &product_b.id, 1).await.unwrap();
    assert_eq!(cart.cart("u1").await.unwrap().total, 45000.0);

    let order = orders.place_from_cart("u1", checkout()).await.unwrap();
    assert_eq!(order.total, 45000.0);
    assert_eq!(order.status, OrderStatus::Pending);

    // Stock went down, clamped at zero, and the cart is empty
    assert_eq!(catalog.product(&product_a.id).await.unwrap().stock, Some(3));
    assert_eq!(catalog.product(&product_b.id).await.unwrap().stock, Some(0));
    assert!(cart.cart("u1").await.unwrap().lines.is_empty());

    // Sold out now
    let result = cart.add_to_cart(Some("u1"), &product_b.id, 1).await;
    assert!(matches!(result.unwrap_err(), AppError::OutOfStock));

    // pending -> processing (admin) -> completed (customer receipt)
    orders
        .transition(&order.id, OrderStatus::Processing, Actor::Admin, "admin-1")
        .await
        .unwrap();
    let done = orders
        .transition(&order.id, OrderStatus::Completed, Actor::Customer, "u1")
        .await
        .unwrap();
    assert_eq!(done.status, OrderStatus::Completed);

    // Terminal: nothing moves a completed order
    let stuck = orders
        .transition(&order.id, OrderStatus::Processing, Actor::Admin, "admin-1")
        .await;
    assert!(matches!(stuck.unwrap_err(), AppError::InvalidTransition { .. }));

    // The purchase unlocks a review, and the aggregate shows up on read
    let review = services
        .reviews()
        .submit_review(
            "u1",
            SubmitReview {
                product_id: product_a.id.clone(),
                rating: 5,
                comment: "Soft sponge, not too sweet".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(review.order_id, order.id);

    let rated = catalog.product(&product_a.id).await.unwrap();
    assert_eq!(rated.review_count, 1);
    assert_eq!(rated.average_rating(), 5.0);

    // One review per (user, product)
    let again = services
        .reviews()
        .submit_review(
            "u1",
            SubmitReview {
                product_id: product_a.id,
                rating: 1,
                comment: "Changed my mind about this".to_string(),
            },
        )
        .await;
    assert!(matches!(again.unwrap_err(), AppError::Conflict(_)));

    let _ = tokio::fs::remove_file(&prefs_path).await;
}

#[tokio::test]
async fn test_cancelled_order_does_not_restock() {
    let (services, prefs_path) = test_services("no-restock").await;
    let catalog = services.catalog();
    let orders = services.orders();

    let category = catalog
        .create_category(CreateCategory { name: "B\u{00e1}nh m\u{1eb7}n".to_string(), image_url: None })
        .await
        .unwrap();
    let product = catalog
        .create_product(CreateProduct {
            name: "B\u{00e1}nh bao".to_string(),
            description: None,
            price: 20000.0,
            stock: Some(4),
            category_id: category.id,
            image_url: None,
        })
        .await
        .unwrap();

    let order = orders.buy_now("u1", &product.id, 3, checkout()).await.unwrap();
    assert_eq!(catalog.product(&product.id).await.unwrap().stock, Some(1));

    orders
        .transition(&order.id, OrderStatus::Cancelled, Actor::Customer, "u1")
        .await
        .unwrap();

    // Cancellation is a status change only; stock stays where it was
    assert_eq!(catalog.product(&product.id).await.unwrap().stock, Some(1));

    let _ = tokio::fs::remove_file(&prefs_path).await;
}
