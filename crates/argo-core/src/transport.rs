//! Client side of the relay call
//!
//! The session only needs "send this request, give me the JSON body or an
//! error", so that is the whole trait. `HttpRelayClient` is the real
//! implementation; tests substitute scripted transports.

use async_trait::async_trait;
use serde_json::Value;

use crate::wire::ChatRequest;

/// Reasons a relay call can fail from the client's point of view
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RelayError {
    #[error("relay returned HTTP {status}")]
    Status { status: u16, body: String },

    #[error("relay request failed: {0}")]
    Transport(String),

    #[error("relay response was not valid JSON: {0}")]
    Decode(String),
}

/// Anything that can carry a chat request to the relay
#[async_trait]
pub trait RelayTransport: Send + Sync {
    /// Send one request and return the parsed 2xx response body
    async fn send(&self, request: &ChatRequest) -> Result<Value, RelayError>;
}

/// reqwest-backed relay client.
///
/// No timeout is set: an in-flight request runs until the relay answers or
/// the connection fails.
#[derive(Clone)]
pub struct HttpRelayClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpRelayClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl RelayTransport for HttpRelayClient {
    async fn send(&self, request: &ChatRequest) -> Result<Value, RelayError> {
        let resp = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| RelayError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(RelayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        resp.json::<Value>()
            .await
            .map_err(|e| RelayError::Decode(e.to_string()))
    }
}
