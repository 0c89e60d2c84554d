//! PoetryDB HTTP client.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::metrics::{UPSTREAM_DURATION, UPSTREAM_REQUESTS};

use super::decoder::{decode, decode_poems};
use super::query::{QueryBuilder, SearchCriteria, DEFAULT_BASE_URL};
use super::types::{Poem, PoetryDbError};
use super::PoetrySource;

/// PoetryDB client configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PoetryDbConfig {
    /// Service origin (default: https://poetrydb.org).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// User-Agent header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("stanza/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for PoetryDbConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/// reqwest-backed [`PoetrySource`].
pub struct PoetryDbClient {
    client: Client,
    queries: QueryBuilder,
}

impl PoetryDbClient {
    /// Create a new client.
    pub fn new(config: &PoetryDbConfig) -> Result<Self, PoetryDbError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| PoetryDbError::from_transport(&e, &config.base_url))?;

        Ok(Self {
            client,
            queries: QueryBuilder::new(&config.base_url),
        })
    }

    pub fn queries(&self) -> &QueryBuilder {
        &self.queries
    }

    /// Issue a GET and return the response if it has a 2xx status.
    async fn get(&self, url: &str, endpoint: &str) -> Result<Response, PoetryDbError> {
        debug!(endpoint = endpoint, url = url, "PoetryDB request");
        let start = Instant::now();

        let result = self.client.get(url).send().await;

        UPSTREAM_DURATION
            .with_label_values(&[endpoint])
            .observe(start.elapsed().as_secs_f64());

        let response = match result {
            Ok(r) => r,
            Err(e) => {
                UPSTREAM_REQUESTS
                    .with_label_values(&[endpoint, "error"])
                    .inc();
                warn!(url = url, "PoetryDB request failed: {}", e);
                return Err(PoetryDbError::from_transport(&e, url));
            }
        };

        let status = response.status();
        UPSTREAM_REQUESTS
            .with_label_values(&[endpoint, status.as_str()])
            .inc();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = if body.trim().is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string()
            } else {
                body.chars().take(200).collect()
            };
            warn!(url = url, status = status.as_u16(), "PoetryDB returned an error status");
            return Err(PoetryDbError::new(status.as_u16(), url, message));
        }

        Ok(response)
    }
}

#[async_trait]
impl PoetrySource for PoetryDbClient {
    async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<Poem>, PoetryDbError> {
        let url = self.queries.search_url(criteria);
        let response = self.get(&url, "search").await?;
        let status = response.status().as_u16();

        let raw: Value = response.json().await.map_err(|e| {
            PoetryDbError::new(status, &url, format!("Failed to parse response: {}", e))
        })?;

        Ok(decode(raw))
    }

    async fn random(&self, count: u32) -> Result<Vec<Poem>, PoetryDbError> {
        let url = self.queries.random_url(count);
        let response = self.get(&url, "random").await?;
        let status = response.status().as_u16();

        let raw: Value = response.json().await.map_err(|e| {
            PoetryDbError::new(status, &url, format!("Failed to parse response: {}", e))
        })?;

        parse_random(raw, status, &url)
    }
}

/// A random sample must be a JSON array; its records are decoded one by one
/// so a single odd record does not cost the whole batch.
fn parse_random(raw: Value, status: u16, url: &str) -> Result<Vec<Poem>, PoetryDbError> {
    match raw {
        Value::Array(items) => Ok(decode_poems(items)),
        other => Err(PoetryDbError::new(
            status,
            url,
            format!(
                "Failed to parse response: expected an array of poems, got {}",
                json_kind(&other)
            ),
        )),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
