//! HTTP client wrapper for the auction search backend.

use std::fmt;

use serde::de::DeserializeOwned;
use tokio::time::sleep;

use crate::error::{ApiError, Error, Result};
use crate::models::{CategoryNode, SearchResponse};
use crate::retry::RetryConfig;

/// Base URL for the auction search backend.
const BASE_URL: &str = "https://api.mabi-auction.dev/v1";

/// Client for the auction search backend.
#[derive(Clone)]
pub struct AuctionClient {
    api_key: String,
    http_client: reqwest::Client,
    base_url: String,
    retry: RetryConfig,
}

impl AuctionClient {
    /// Creates a new client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            http_client: reqwest::Client::new(),
            base_url: BASE_URL.to_string(),
            retry: RetryConfig::default(),
        }
    }

    /// Creates a new client with a custom base URL (for testing or
    /// self-hosted backends).
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            http_client: reqwest::Client::new(),
            base_url: base_url.into(),
            retry: RetryConfig::default(),
        }
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches one page of auction listings for a leaf category.
    ///
    /// # Arguments
    /// * `category_id` - The leaf category to search (e.g. "weapon/one-handed")
    /// * `keyword` - Optional item-name keyword
    /// * `cursor` - Optional pagination cursor from a previous page
    pub async fn search(
        &self,
        category_id: &str,
        keyword: Option<&str>,
        cursor: Option<&str>,
    ) -> Result<SearchResponse> {
        let mut query: Vec<(&str, &str)> = vec![("category", category_id)];
        if let Some(keyword) = keyword {
            query.push(("keyword", keyword));
        }
        if let Some(cursor) = cursor {
            query.push(("cursor", cursor));
        }
        self.get("/auction/list", &query).await
    }

    /// Fetches the full category tree.
    pub async fn categories(&self) -> Result<Vec<CategoryNode>> {
        self.get("/auction/categories", &[]).await
    }

    /// Performs a GET request, retrying on rate limiting with backoff.
    async fn get<T: DeserializeOwned>(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<T> {
        let url = format!("{}{}", self.base_url, endpoint);

        let mut attempt = 0;
        loop {
            let response = self
                .http_client
                .get(&url)
                .bearer_auth(&self.api_key)
                .query(query)
                .send()
                .await?;

            let status = response.status();
            if status.is_success() {
                return Ok(response.json::<T>().await?);
            }

            if status.as_u16() == 429 && attempt < self.retry.max_retries {
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok());
                sleep(self.retry.calculate_backoff(attempt, retry_after)).await;
                attempt += 1;
                continue;
            }

            return Err(Self::parse_error_response(response).await);
        }
    }

    /// Parses an error response into our error types.
    async fn parse_error_response(response: reqwest::Response) -> Error {
        let status = response.status();
        let status_code = status.as_u16();

        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        let message = response.text().await.unwrap_or_default();

        let api_error = match status_code {
            401 | 403 => ApiError::Auth {
                message: if message.is_empty() {
                    "Authentication failed".to_string()
                } else {
                    message
                },
            },
            404 => ApiError::NotFound {
                resource: "endpoint".to_string(),
                id: "unknown".to_string(),
            },
            429 => ApiError::RateLimit { retry_after },
            400 => ApiError::Validation {
                message: if message.is_empty() {
                    "Bad request".to_string()
                } else {
                    message
                },
            },
            _ => ApiError::Http {
                status: status_code,
                message: if message.is_empty() {
                    status
                        .canonical_reason()
                        .unwrap_or("Unknown error")
                        .to_string()
                } else {
                    message
                },
            },
        };

        Error::Api(api_error)
    }
}

impl fmt::Debug for AuctionClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuctionClient")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod client_tests;
