//! Content store client over the REST objects API

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use super::{ContentStore, Query, StoreError};
use crate::config::StoreConfig;

const API_VERSION: &str = "v3";

/// Async content store client
pub struct HttpStore {
    http_client: reqwest::Client,
    objects_url: String,
    read_key: String,
}

/// Body of a successful objects query
#[derive(Debug, Deserialize)]
struct ObjectsResponse {
    #[serde(default)]
    objects: Vec<Value>,
    #[serde(default)]
    total: Option<u64>,
}

/// Body of an error response
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl HttpStore {
    /// Build a client from validated configuration
    pub fn new(config: &StoreConfig) -> Result<Self> {
        config.validate()?;

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        let objects_url = format!(
            "{}/{}/buckets/{}/objects",
            config.base_url(),
            API_VERSION,
            config.bucket_slug
        );

        tracing::debug!(
            "Content store client for {} ({})",
            objects_url,
            config.api_environment
        );

        Ok(Self {
            http_client,
            objects_url,
            read_key: config.read_key.clone(),
        })
    }

    /// Query string for a request
    fn params(&self, query: &Query, limit: Option<u32>) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("read_key", self.read_key.clone()),
            ("query", query.to_json().to_string()),
        ];

        if let Some(props) = query.projection() {
            params.push(("props", props.join(",")));
        }
        if query.expansion_depth() > 0 {
            params.push(("depth", query.expansion_depth().to_string()));
        }
        if let Some(limit) = limit {
            params.push(("limit", limit.to_string()));
        }

        params
    }

    async fn fetch(
        &self,
        query: &Query,
        limit: Option<u32>,
    ) -> Result<ObjectsResponse, StoreError> {
        let response = self
            .http_client
            .get(&self.objects_url)
            .query(&self.params(query, limit))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("Unknown error")
                        .to_string()
                });
            return Err(StoreError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ObjectsResponse = serde_json::from_str(&body)?;
        tracing::trace!(
            "{} returned {} of {:?} objects",
            query.kind(),
            parsed.objects.len(),
            parsed.total
        );
        Ok(parsed)
    }
}

#[async_trait]
impl ContentStore for HttpStore {
    async fn find(&self, query: &Query) -> Result<Vec<Value>, StoreError> {
        Ok(self.fetch(query, None).await?.objects)
    }

    async fn find_one(&self, query: &Query) -> Result<Value, StoreError> {
        self.fetch(query, Some(1))
            .await?
            .objects
            .into_iter()
            .next()
            .ok_or_else(StoreError::not_found)
    }
}
