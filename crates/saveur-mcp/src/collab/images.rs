//! Image-search collaborator
//!
//! Pexels client behind the [`ImageSearch`] trait. Argument validation
//! happens in the tool handler before the trait is reached, so
//! implementations only deal with the network exchange.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ToolError;

const PEXELS_BASE_URL: &str = "https://api.pexels.com/v1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// One image hit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageResult {
    pub id: i64,
    pub url: String,
    pub photographer: String,
    pub alt: String,
}

/// Result of an image search, in upstream order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageSearchResponse {
    pub query: String,
    pub total_results: i64,
    pub images: Vec<ImageResult>,
}

/// Image-search collaborator interface.
#[async_trait]
pub trait ImageSearch: Send + Sync {
    async fn search(&self, query: &str, per_page: i64)
    -> Result<ImageSearchResponse, ToolError>;
}

/// Pexels image-search client.
pub struct PexelsClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl PexelsClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: PEXELS_BASE_URL.to_string(),
            api_key,
        }
    }

    /// Override the API base URL, for tests against a local mock server.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }
}

#[async_trait]
impl ImageSearch for PexelsClient {
    async fn search(
        &self,
        query: &str,
        per_page: i64,
    ) -> Result<ImageSearchResponse, ToolError> {
        let url = format!("{}/search", self.base_url);

        let response = self
            .client
            .get(&url)
            .header("Authorization", &self.api_key)
            .query(&[("query", query), ("per_page", &per_page.to_string())])
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ToolError::Upstream(format!(
                "Pexels error {status}: {body}"
            )));
        }

        let data: Value = response.json().await?;
        let photos = data
            .get("photos")
            .and_then(Value::as_array)
            .ok_or_else(|| ToolError::Upstream("Pexels response has no photos array".into()))?;

        let images: Vec<ImageResult> = photos
            .iter()
            .map(|p| ImageResult {
                id: p.get("id").and_then(Value::as_i64).unwrap_or_default(),
                url: p
                    .pointer("/src/large")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                photographer: p
                    .get("photographer")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                alt: p
                    .get("alt")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
            })
            .collect();

        let total_results = data
            .get("total_results")
            .and_then(Value::as_i64)
            .unwrap_or(images.len() as i64);

        Ok(ImageSearchResponse {
            query: query.to_string(),
            total_results,
            images,
        })
    }
}
