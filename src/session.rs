//! Xano session management.
//!
//! Holds the process-lifetime configuration (token, default instance) and the
//! HTTP client every tool call funnels through.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value as JsonValue;

use crate::error::{McpError, Result};

/// Global Meta API base. Only used for instance discovery.
const GLOBAL_META_API: &str = "https://app.xano.com/api:meta";

/// Domain suffix Xano instances are served under.
const INSTANCE_DOMAIN_SUFFIX: &str = "n7c.xano.io";

/// Default HTTP request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Maximum number of upstream body characters echoed back in error results.
const ERROR_BODY_LIMIT: usize = 500;

/// Configuration for a Xano session.
#[derive(Debug, Clone)]
pub struct XanoConfig {
    /// Bearer token for the Meta API.
    token: SecretString,
    /// Instance used when a tool call omits `instance_name`.
    default_instance: Option<String>,
    /// Request timeout.
    timeout: Duration,
    /// Base URL override. Replaces both the global and per-instance bases;
    /// used by tests and self-hosted deployments.
    base_url: Option<String>,
}

impl XanoConfig {
    /// Creates a new configuration with the given API token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: SecretString::new(token.into()),
            default_instance: None,
            timeout: DEFAULT_TIMEOUT,
            base_url: None,
        }
    }

    /// Sets the default instance name.
    pub fn with_default_instance(mut self, instance: impl Into<String>) -> Self {
        self.default_instance = Some(instance.into());
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Overrides the Meta API base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Exposes the token (for making requests).
    fn token(&self) -> &str {
        self.token.expose_secret()
    }
}

/// Xano session.
///
/// Immutable after construction; each tool call issues exactly one HTTP
/// request through [`XanoSession::send`].
pub struct XanoSession {
    config: XanoConfig,
    client: Client,
}

impl XanoSession {
    /// Create a new session from a configuration.
    pub fn new(config: XanoConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| McpError::Internal(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Resolve the instance an operation targets: the explicit argument if
    /// given, otherwise the configured default.
    pub fn resolve_instance(&self, explicit: Option<String>) -> Result<String> {
        explicit
            .or_else(|| self.config.default_instance.clone())
            .ok_or_else(|| McpError::MissingArg("instance_name".to_string()))
    }

    /// Fully qualified domain of an instance.
    pub fn instance_domain(&self, instance: &str) -> String {
        format!("{}.{}", instance, INSTANCE_DOMAIN_SUFFIX)
    }

    /// Base URL of the global Meta API.
    pub fn global_meta_url(&self) -> String {
        match &self.config.base_url {
            Some(url) => url.clone(),
            None => GLOBAL_META_API.to_string(),
        }
    }

    /// Base URL of an instance's Meta API.
    pub fn instance_meta_url(&self, instance: &str) -> String {
        match &self.config.base_url {
            Some(url) => url.clone(),
            None => format!("https://{}/api:meta", self.instance_domain(instance)),
        }
    }

    /// Start a request with auth and content headers attached.
    pub fn request(&self, method: Method, url: &str) -> RequestBuilder {
        tracing::debug!(%method, %url, "meta api request");
        self.client
            .request(method, url)
            .bearer_auth(self.config.token())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header(reqwest::header::ACCEPT, "application/json")
    }

    /// Send a request and map the response per the adapter contract: parsed
    /// JSON on success, `McpError::Api` on any non-2xx status, `Network` when
    /// no response arrived, `Parse` when the body is not JSON.
    pub async fn send(&self, builder: RequestBuilder) -> Result<JsonValue> {
        let response = builder.send().await?;
        let status = response.status();
        tracing::debug!(status = %status, "meta api response");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(McpError::Api {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(JsonValue::Null);
        }
        serde_json::from_str(&text).map_err(|e| McpError::Parse(e.to_string()))
    }

    /// GET a URL and return the parsed JSON body.
    pub async fn get(&self, url: &str) -> Result<JsonValue> {
        self.send(self.request(Method::GET, url)).await
    }

    /// POST a JSON body and return the parsed response.
    pub async fn post(&self, url: &str, body: &JsonValue) -> Result<JsonValue> {
        self.send(self.request(Method::POST, url).json(body)).await
    }

    /// PUT a JSON body and return the parsed response.
    pub async fn put(&self, url: &str, body: &JsonValue) -> Result<JsonValue> {
        self.send(self.request(Method::PUT, url).json(body)).await
    }

    /// DELETE a URL and return the parsed response.
    pub async fn delete(&self, url: &str) -> Result<JsonValue> {
        self.send(self.request(Method::DELETE, url)).await
    }

    /// DELETE with a JSON body, for endpoints that take delete options.
    pub async fn delete_json(&self, url: &str, body: &JsonValue) -> Result<JsonValue> {
        self.send(self.request(Method::DELETE, url).json(body)).await
    }
}

/// Clamp an upstream body to [`ERROR_BODY_LIMIT`] characters.
fn truncate_body(body: &str) -> String {
    match body.char_indices().nth(ERROR_BODY_LIMIT) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
