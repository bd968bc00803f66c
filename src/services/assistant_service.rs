//! Assistant service - chat suggestions matched back to the catalog.

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::ASSISTANT_PRODUCTS_SENTINEL;
use crate::domain::Product;
use crate::errors::AppResult;
use crate::infra::{CompletionClient, ProductRepository};

/// Assistant reply: the conversational text plus any catalog entries the
/// suggested names matched.
#[derive(Debug, Clone)]
pub struct AssistantReply {
    pub message: String,
    pub suggestions: Vec<Product>,
}

/// Assistant service trait for dependency injection.
#[async_trait]
pub trait AssistantService: Send + Sync {
    /// Ask the completion endpoint for advice and product suggestions.
    async fn suggest(&self, user_message: &str) -> AppResult<AssistantReply>;
}

/// Concrete implementation of AssistantService
pub struct AssistantManager {
    client: Arc<dyn CompletionClient>,
    products: Arc<dyn ProductRepository>,
}

impl AssistantManager {
    pub fn new(client: Arc<dyn CompletionClient>, products: Arc<dyn ProductRepository>) -> Self {
        Self { client, products }
    }

    fn build_prompt(user_message: &str) -> String {
        format!(
            "You are a helpful bakery shopping assistant. Answer the customer \
             briefly, then finish with a line containing exactly `{sentinel}` \
             followed by suggested product names, one per line.\n\nCustomer: {message}",
            sentinel = ASSISTANT_PRODUCTS_SENTINEL,
            message = user_message,
        )
    }

    /// Split a completion at the sentinel line into the conversational
    /// part and the suggested names under it.
    fn parse_completion(completion: &str) -> (String, Vec<String>) {
        match completion.split_once(ASSISTANT_PRODUCTS_SENTINEL) {
            Some((message, tail)) => {
                let names = tail
                    .lines()
                    .map(|l| l.trim().trim_start_matches('-').trim())
                    .filter(|l| !l.is_empty())
                    .map(str::to_string)
                    .collect();
                (message.trim().to_string(), names)
            }
            None => (completion.trim().to_string(), Vec::new()),
        }
    }
}

#[async_trait]
impl AssistantService for AssistantManager {
    async fn suggest(&self, user_message: &str) -> AppResult<AssistantReply> {
        // The completion and the catalog are independent fetches
        let prompt = Self::build_prompt(user_message);
        let (completion, catalog) =
            futures::try_join!(self.client.complete(&prompt), self.products.list())?;

        let (message, names) = Self::parse_completion(&completion);
        if names.is_empty() {
            return Ok(AssistantReply { message, suggestions: Vec::new() });
        }

        // Match suggested names back to the catalog by case-insensitive
        // substring in either direction, deduplicated by product id
        let mut suggestions: Vec<Product> = Vec::new();
        for name in &names {
            let needle = name.to_lowercase();
            for product in &catalog {
                let candidate = product.name.to_lowercase();
                let matched = candidate.contains(&needle) || needle.contains(&candidate);
                if matched && !suggestions.iter().any(|p| p.id == product.id) {
                    suggestions.push(product.clone());
                }
            }
        }

        Ok(AssistantReply { message, suggestions })
    }
}
