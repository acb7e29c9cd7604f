//! HTTP client for the Fathom external API.

use crate::tools::query::QueryParameters;
use crate::types::{ApiConfig, Error, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use std::time::Instant;

/// Header carrying the API key on every request.
pub const API_KEY_HEADER: &str = "X-Api-Key";

/// Authenticated GET against the Fathom API.
///
/// The executor only talks to this trait, so tests can swap in a mock or a
/// canned transport.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApiTransport: Send + Sync {
    /// GET `endpoint` with `query` and return the decoded JSON body.
    async fn get(&self, endpoint: &str, query: &QueryParameters) -> Result<Value>;
}

/// `reqwest`-backed transport.
#[derive(Debug, Clone)]
pub struct FathomClient {
    http: reqwest::Client,
    base_url: String,
    api_key: SecretString,
}

impl FathomClient {
    /// Build a client from configuration. Fails when no API key is set.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.expose_secret().is_empty())
            .ok_or_else(|| Error::config(format!("Missing {}", crate::types::API_KEY_ENV)))?;

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("fathom-mcp/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Full request URL. The endpoint is appended to the base path, never
    /// resolved against the host root.
    pub fn url_for(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }
}

#[async_trait]
impl ApiTransport for FathomClient {
    async fn get(&self, endpoint: &str, query: &QueryParameters) -> Result<Value> {
        let url = self.url_for(endpoint);
        let pairs = query.to_pairs();
        let started = Instant::now();

        let response = self
            .http
            .get(&url)
            .query(&pairs)
            .header(API_KEY_HEADER, self.api_key.expose_secret())
            .send()
            .await
            .map_err(|source| Error::Request {
                method: "GET".to_string(),
                endpoint: endpoint.to_string(),
                source,
            })?;

        let status = response.status();
        tracing::debug!(
            endpoint,
            params = pairs.len(),
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Fathom API request completed"
        );

        if !status.is_success() {
            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("")
                .to_string();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Transport {
                status: status.as_u16(),
                method: "GET".to_string(),
                endpoint: endpoint.to_string(),
                detail: error_detail(&content_type, &body),
            });
        }

        let body = response.text().await.map_err(|source| Error::Request {
            method: "GET".to_string(),
            endpoint: endpoint.to_string(),
            source,
        })?;
        serde_json::from_str(&body)
            .map_err(|e| Error::render(format!("invalid JSON from {endpoint}: {e}")))
    }
}

/// Human-readable detail from an error body.
///
/// JSON bodies yield their `message`, then `error`, then the bare string, then
/// the compact JSON. Anything else is returned as raw text.
pub fn error_detail(content_type: &str, body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    if content_type.contains("application/json") {
        if let Ok(value) = serde_json::from_str::<Value>(body) {
            let detail = match &value {
                Value::String(s) => s.clone(),
                Value::Object(map) => match map.get("message").or_else(|| map.get("error")) {
                    Some(Value::String(s)) => s.clone(),
                    Some(other) => other.to_string(),
                    None => value.to_string(),
                },
                other => other.to_string(),
            };
            return Some(detail);
        }
    }
    Some(body.to_string())
}
