//! Relay failures and the JSON error bodies they turn into

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::webhook::WebhookError;

pub const UNAVAILABLE_MESSAGE: &str = "Argo is currently unavailable. Please try again later.";
pub const INTERNAL_MESSAGE: &str = "An unexpected error occurred. Please try again later.";

/// Every way a relay request can end without a 200
#[derive(Debug, thiserror::Error)]
pub enum RelayFailure {
    #[error("message is required")]
    MissingMessage,

    #[error("downstream webhook failed: {0}")]
    Downstream(WebhookError),

    #[error("unexpected relay error: {0}")]
    Internal(String),
}

impl From<WebhookError> for RelayFailure {
    fn from(err: WebhookError) -> Self {
        match err {
            // The webhook answered 2xx but not with JSON; nothing to relay
            WebhookError::Decode(msg) => RelayFailure::Internal(msg),
            other => RelayFailure::Downstream(other),
        }
    }
}

impl RelayFailure {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayFailure::MissingMessage => StatusCode::BAD_REQUEST,
            RelayFailure::Downstream(_) => StatusCode::BAD_GATEWAY,
            RelayFailure::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RelayFailure {
    fn into_response(self) -> Response {
        let body = match &self {
            RelayFailure::MissingMessage => json!({ "error": "Message is required" }),
            RelayFailure::Downstream(err) => {
                tracing::error!(error = %err, "error from webhook");
                json!({
                    "error": "Failed to process request",
                    "message": UNAVAILABLE_MESSAGE,
                })
            }
            RelayFailure::Internal(detail) => {
                tracing::error!(error = %detail, "unexpected relay error");
                json!({
                    "error": "Internal server error",
                    "message": INTERNAL_MESSAGE,
                })
            }
        };
        (self.status(), Json(body)).into_response()
    }
}
