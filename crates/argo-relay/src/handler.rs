//! The relay endpoint
//!
//! `POST /` (or `/chat`) with `{user_id?, message}`:
//! 1. reject a missing or empty message with 400
//! 2. write an audit record, ignoring failures
//! 3. forward to the webhook; 502 if it fails, its JSON body on success
//!
//! Preflight `OPTIONS` requests never reach the handler; the CORS layer
//! answers them with an empty body.

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::Value;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;

use argo_core::ChatRequest;
use argo_memory::{AuditError, AuditLog, AuditRecord};

use crate::error::RelayFailure;
use crate::webhook::Forwarder;

/// Characters of the message included in the request log line
const LOG_PREVIEW_CHARS: usize = 50;

/// Request headers browsers may send; echoed on every response
const ALLOWED_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

/// Shared, read-only collaborators for every request
#[derive(Clone)]
pub struct RelayState {
    pub audit: Arc<dyn AuditLog>,
    pub webhook: Arc<dyn Forwarder>,
}

impl RelayState {
    pub fn new(audit: Arc<dyn AuditLog>, webhook: Arc<dyn Forwarder>) -> Self {
        Self { audit, webhook }
    }
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers([
            header::AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            header::CONTENT_TYPE,
        ])
}

/// Router serving the relay at `/` and `/chat`
///
/// `CorsLayer` only sends the allow-headers list on preflight, so it is
/// added to every other response as well.
pub fn router(state: RelayState) -> Router {
    Router::new()
        .route("/", post(handle_chat))
        .route("/chat", post(handle_chat))
        .layer(cors())
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        ))
        .with_state(state)
}

/// Serve the relay until the listener fails
pub async fn serve(listener: tokio::net::TcpListener, state: RelayState) -> std::io::Result<()> {
    axum::serve(listener, router(state)).await
}

async fn handle_chat(State(state): State<RelayState>, body: Bytes) -> Response {
    match relay(&state, &body).await {
        Ok(reply) => (StatusCode::OK, Json(reply)).into_response(),
        Err(failure) => failure.into_response(),
    }
}

/// Run one relay request from its raw JSON body
pub async fn relay(state: &RelayState, body: &[u8]) -> Result<Value, RelayFailure> {
    let request: ChatRequest =
        serde_json::from_slice(body).map_err(|e| RelayFailure::Internal(format!("invalid request body: {}", e)))?;

    let message = request.message_text().ok_or(RelayFailure::MissingMessage)?;
    let preview: String = message.chars().take(LOG_PREVIEW_CHARS).collect();
    tracing::info!(message = %preview, "processing chat request");

    let record = AuditRecord::from_ui(request.user_id.clone(), message);
    match state.audit.insert(&record).await {
        Ok(()) => {}
        Err(AuditError::NotConnected) => {
            tracing::debug!("audit log disabled; message not stored");
        }
        Err(e) => {
            tracing::error!(error = %e, "error storing message in memory");
        }
    }

    let forwarded = ChatRequest {
        user_id: request.user_id.clone(),
        message: Some(message.to_string()),
    };
    let reply = state.webhook.forward(&forwarded).await?;

    tracing::info!(
        response_len = reply.to_string().len(),
        "successfully processed chat request"
    );
    Ok(reply)
}
