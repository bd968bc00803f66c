//! REST client for the hosted document database.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::{Map, Value};

use super::{DocumentStore, Filter, OrderBy};
use crate::config::Config;
use crate::errors::{AppError, AppResult};

/// [`DocumentStore`] implementation speaking the hosted store's REST API.
#[derive(Clone)]
pub struct RestStore {
    base_url: String,
    client: reqwest::Client,
}

impl RestStore {
    pub fn new(config: &Config) -> Self {
        Self {
            base_url: config.store_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn document_url(&self, collection: &str, id: &str) -> String {
        format!("{}/{}/{}", self.base_url, collection, id)
    }

    fn collection_url(&self, collection: &str, verb: &str) -> String {
        format!("{}/{}:{}", self.base_url, collection, verb)
    }
}

fn status_error(status: StatusCode) -> AppError {
    match status {
        StatusCode::UNAUTHORIZED => AppError::Unauthorized,
        StatusCode::FORBIDDEN => AppError::Forbidden,
        StatusCode::NOT_FOUND => AppError::NotFound,
        StatusCode::CONFLICT => AppError::conflict("Document"),
        other => AppError::internal(format!("Store returned {}", other)),
    }
}

#[derive(Serialize)]
struct QueryBody<'a> {
    filters: &'a [FilterBody<'a>],
    #[serde(skip_serializing_if = "Option::is_none")]
    order_by: Option<OrderBody<'a>>,
}

#[derive(Serialize)]
struct FilterBody<'a> {
    field: &'a str,
    value: &'a Value,
}

#[derive(Serialize)]
struct OrderBody<'a> {
    field: &'a str,
    descending: bool,
}

#[derive(Serialize)]
struct AdjustBody<'a> {
    field: &'a str,
    delta: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    floor: Option<f64>,
}

#[async_trait]
impl DocumentStore for RestStore {
    async fn insert(&self, collection: &str, id: &str, document: Value) -> AppResult<()> {
        let response = self
            .client
            .post(self.document_url(collection, id))
            .json(&document)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(status_error(response.status()));
        }
        Ok(())
    }

    async fn get(&self, collection: &str, id: &str) -> AppResult<Option<Value>> {
        let response = self
            .client
            .get(self.document_url(collection, id))
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(status_error(response.status()));
        }
        Ok(Some(response.json().await?))
    }

    async fn update(&self, collection: &str, id: &str, fields: Map<String, Value>) -> AppResult<()> {
        let response = self
            .client
            .patch(self.document_url(collection, id))
            .json(&Value::Object(fields))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(status_error(response.status()));
        }
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> AppResult<()> {
        let response = self
            .client
            .delete(self.document_url(collection, id))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(status_error(response.status()));
        }
        Ok(())
    }

    async fn query(
        &self,
        collection: &str,
        filters: &[Filter],
        order: Option<&OrderBy>,
    ) -> AppResult<Vec<Value>> {
        let filter_bodies: Vec<FilterBody<'_>> = filters
            .iter()
            .map(|f| FilterBody { field: &f.field, value: &f.value })
            .collect();
        let body = QueryBody {
            filters: &filter_bodies,
            order_by: order.map(|o| OrderBody { field: &o.field, descending: o.descending }),
        };

        let response = self
            .client
            .post(self.collection_url(collection, "query"))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(status_error(response.status()));
        }
        Ok(response.json().await?)
    }

    async fn adjust(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        delta: f64,
        floor: Option<f64>,
    ) -> AppResult<f64> {
        let response = self
            .client
            .post(format!("{}:adjust", self.document_url(collection, id)))
            .json(&AdjustBody { field, delta, floor })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(status_error(response.status()));
        }

        let body: Value = response.json().await?;
        body.get("value")
            .and_then(Value::as_f64)
            .ok_or_else(|| AppError::internal("Adjust response missing value"))
    }
}
