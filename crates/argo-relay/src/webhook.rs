//! Downstream automation webhook

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

use argo_core::ChatRequest;

#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    #[error("webhook returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Connection failure or timeout
    #[error("webhook request failed: {0}")]
    Transport(String),

    #[error("webhook response was not valid JSON: {0}")]
    Decode(String),

    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

/// Where the relay sends validated chat requests
#[async_trait]
pub trait Forwarder: Send + Sync {
    async fn forward(&self, request: &ChatRequest) -> Result<Value, WebhookError>;
}

/// POSTs `{user_id, message}` to a fixed URL with a bounded timeout
pub struct WebhookForwarder {
    client: reqwest::Client,
    url: String,
}

impl WebhookForwarder {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, WebhookError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WebhookError::Client(e.to_string()))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Forwarder for WebhookForwarder {
    async fn forward(&self, request: &ChatRequest) -> Result<Value, WebhookError> {
        let resp = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|e| WebhookError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(WebhookError::Status {
                status: status.as_u16(),
                body,
            });
        }

        resp.json::<Value>()
            .await
            .map_err(|e| WebhookError::Decode(e.to_string()))
    }
}
