//! `reqwest`-backed [`Transport`].
//!
//! # Examples
//!
//! ## Reading a resource
//!
//! ```ignore
//! use source_editor::client::{HttpClient, Transport};
//! use source_editor::WebRequest;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = HttpClient::new()?;
//!     let response = client.web_operation("https://example.org/card.ttl", WebRequest::get()).await?;
//!     println!("Status: {}", response.status);
//!     Ok(())
//! }
//! ```
//!
//! ## Conditional write
//!
//! ```ignore
//! let request = WebRequest::put("<> a <#Doc> .", "text/turtle").with_if_match("\"E1\"");
//! let response = client.web_operation("https://example.org/card.ttl", request).await?;
//! if response.status == 412 {
//!     println!("someone else changed it");
//! }
//! ```

use super::{config::ClientConfig, utils::exponential_backoff, Transport};
use crate::error::{EditorError, Result};
use crate::protocol::headers;
use crate::types::{WebRequest, WebResponse};
use async_trait::async_trait;
use http::Method;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

/// HTTP transport for the editor.
///
/// # Features
///
/// - Conditional requests via `If-Match`
/// - Automatic retry with exponential backoff for transient failures
/// - Connection pooling through a shared `reqwest::Client`
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    config: Arc<ClientConfig>,
}

impl HttpClient {
    /// Create a client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .pool_idle_timeout(Duration::from_secs(90))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| transport_error(&Method::GET, e))?;

        Ok(HttpClient {
            client,
            config: Arc::new(config),
        })
    }

    /// Get the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn send_with_retries(&self, uri: &str, request: &WebRequest) -> Result<WebResponse> {
        let mut attempt = 0;
        loop {
            match self.send(uri, request).await {
                Ok(response) => return Ok(response),
                Err(e) if e.is_retryable() && attempt < self.config.max_retries => {
                    let delay = exponential_backoff(attempt, self.config.retry_delay_ms);
                    tracing::warn!(
                        "{} {} failed (attempt {}), retrying after {:?}: {}",
                        request.method,
                        uri,
                        attempt + 1,
                        delay,
                        e
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn send(&self, uri: &str, request: &WebRequest) -> Result<WebResponse> {
        let method = request.method.clone();
        let mut req_builder = self.client.request(method.clone(), uri);

        for (k, v) in &request.headers {
            req_builder = req_builder.header(k.as_str(), v.as_str());
        }
        if let Some(content_type) = &request.content_type {
            req_builder = req_builder.header(headers::CONTENT_TYPE, content_type.as_str());
        }
        if let Some(body) = &request.body {
            req_builder = req_builder.body(body.clone());
        }

        let response = req_builder
            .send()
            .await
            .map_err(|e| transport_error(&method, e))?;

        let status = response.status().as_u16();
        let mut response_headers = BTreeMap::new();
        for (k, v) in response.headers() {
            if let Ok(val) = v.to_str() {
                response_headers.insert(k.as_str().to_string(), val.to_string());
            }
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| transport_error(&method, e))?;

        if self.config.enable_logging {
            tracing::debug!("{} {} -> {} ({} bytes)", method, uri, status, body.len());
        }

        Ok(WebResponse {
            status,
            headers: response_headers,
            body: Some(body),
        })
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn web_operation(&self, uri: &str, request: WebRequest) -> Result<WebResponse> {
        self.send_with_retries(uri, &request).await
    }
}

fn transport_error(method: &Method, err: reqwest::Error) -> EditorError {
    let message = if err.is_timeout() {
        format!("request timed out: {}", err)
    } else if err.is_connect() {
        format!("connect failed: {}", err)
    } else {
        err.to_string()
    };
    EditorError::Transport {
        method: method.clone(),
        message,
    }
}
