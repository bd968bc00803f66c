//! Assistant service unit tests: sentinel prompt convention and
//! suggestion matching.

use std::sync::Arc;

use chrono::Utc;

use bakehouse::domain::Product;
use bakehouse::infra::repositories::MockProductRepository;
use bakehouse::infra::MockCompletionClient;
use bakehouse::services::{AssistantManager, AssistantService};

fn catalog_product(id: &str, name: &str) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        description: None,
        price: 25000.0,
        stock: Some(10),
        category_id: "c1".to_string(),
        image_url: None,
        rating_sum: 0.0,
        review_count: 0,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[tokio::test]
async fn test_suggestions_match_catalog_by_substring() {
    let mut client = MockCompletionClient::new();
    let mut products = MockProductRepository::new();

    // The prompt must carry the sentinel instruction
    client
        .expect_complete()
        .withf(|prompt: &str| prompt.contains("PRODUCTS:"))
        .returning(|_| {
            Ok("Something creamy would fit.\n\nPRODUCTS:\n- b\u{00e1}nh kem\n- Tiramisu\n".to_string())
        });
    products.expect_list().returning(|| {
        Ok(vec![
            catalog_product("p1", "B\u{00e1}nh kem d\u{00e2}u"),
            catalog_product("p2", "Flan caramel"),
        ])
    });

    let service = AssistantManager::new(Arc::new(client), Arc::new(products));
    let reply = service.suggest("what should I get for a birthday?").await.unwrap();

    assert_eq!(reply.message, "Something creamy would fit.");
    let ids: Vec<_> = reply.suggestions.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["p1"]);
}

#[tokio::test]
async fn test_reply_without_sentinel_suggests_nothing() {
    let mut client = MockCompletionClient::new();
    let mut products = MockProductRepository::new();

    client
        .expect_complete()
        .returning(|_| Ok("We open at seven every morning.".to_string()));
    products.expect_list().returning(|| Ok(vec![]));

    let service = AssistantManager::new(Arc::new(client), Arc::new(products));
    let reply = service.suggest("when do you open?").await.unwrap();

    assert_eq!(reply.message, "We open at seven every morning.");
    assert!(reply.suggestions.is_empty());
}
