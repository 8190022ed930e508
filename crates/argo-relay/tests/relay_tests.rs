//! Integration tests for the relay endpoint
//!
//! The router is driven in-process; storage and webhook are fakes that
//! record what they were asked to do.

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

use argo_core::ChatRequest;
use argo_memory::{AuditError, AuditLog, AuditRecord};
use argo_relay::{router, Forwarder, RelayState, WebhookError};

#[derive(Default)]
struct FakeAudit {
    fail: bool,
    records: Mutex<Vec<AuditRecord>>,
}

#[async_trait]
impl AuditLog for FakeAudit {
    async fn insert(&self, record: &AuditRecord) -> Result<(), AuditError> {
        self.records.lock().unwrap().push(record.clone());
        if self.fail {
            Err(AuditError::Request("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

struct FakeWebhook {
    reply: fn() -> Result<Value, WebhookError>,
    calls: Mutex<Vec<ChatRequest>>,
}

impl FakeWebhook {
    fn replying(reply: fn() -> Result<Value, WebhookError>) -> Self {
        Self {
            reply,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<ChatRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Forwarder for FakeWebhook {
    async fn forward(&self, request: &ChatRequest) -> Result<Value, WebhookError> {
        self.calls.lock().unwrap().push(request.clone());
        (self.reply)()
    }
}

fn ok_reply() -> Result<Value, WebhookError> {
    Ok(json!({ "reply_message": "Done.", "meta": { "run": 7 } }))
}

fn app(audit: &Arc<FakeAudit>, webhook: &Arc<FakeWebhook>) -> Router {
    router(RelayState::new(audit.clone(), webhook.clone()))
}

fn post(body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::ORIGIN, "https://app.argoassist.com")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn read_json(resp: axum::response::Response) -> Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn assert_cors(resp: &axum::response::Response) {
    assert_eq!(
        resp.headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
    let allow_headers = resp
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_HEADERS)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    for name in ["authorization", "x-client-info", "apikey", "content-type"] {
        assert!(allow_headers.contains(name), "missing {name} in {allow_headers:?}");
    }
}

#[tokio::test]
async fn test_success_passes_body_through() {
    let audit = Arc::new(FakeAudit::default());
    let webhook = Arc::new(FakeWebhook::replying(ok_reply));

    let resp = app(&audit, &webhook)
        .oneshot(post(r#"{"user_id": "test-user", "message": "book a table"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_cors(&resp);
    assert_eq!(read_json(resp).await, ok_reply().unwrap());

    assert_eq!(webhook.calls(), vec![ChatRequest::new("test-user", "book a table")]);
    let records = audit.records.lock().unwrap();
    assert_eq!(
        *records,
        vec![AuditRecord::from_ui(Some("test-user".to_string()), "book a table")]
    );
}

#[tokio::test]
async fn test_chat_path_is_served() {
    let audit = Arc::new(FakeAudit::default());
    let webhook = Arc::new(FakeWebhook::replying(ok_reply));

    let req = Request::builder()
        .method(Method::POST)
        .uri("/chat")
        .body(Body::from(r#"{"message": "hi"}"#))
        .unwrap();
    let resp = app(&audit, &webhook).oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_cors(&resp);
    assert_eq!(webhook.calls()[0].user_id, None);
}

#[tokio::test]
async fn test_empty_message_is_rejected() {
    for body in [r#"{"message": ""}"#, r#"{"user_id": "test-user"}"#, "{}"] {
        let audit = Arc::new(FakeAudit::default());
        let webhook = Arc::new(FakeWebhook::replying(ok_reply));

        let resp = app(&audit, &webhook).oneshot(post(body)).await.unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "body: {body}");
        assert_cors(&resp);
        assert_eq!(read_json(resp).await, json!({ "error": "Message is required" }));
        assert!(webhook.calls().is_empty());
        assert!(audit.records.lock().unwrap().is_empty());
    }
}

#[tokio::test]
async fn test_downstream_error_is_502() {
    let audit = Arc::new(FakeAudit::default());
    let webhook = Arc::new(FakeWebhook::replying(|| {
        Err(WebhookError::Status {
            status: 503,
            body: "maintenance".to_string(),
        })
    }));

    let resp = app(&audit, &webhook)
        .oneshot(post(r#"{"user_id": "test-user", "message": "hello"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    assert_cors(&resp);
    let body = read_json(resp).await;
    assert_eq!(body["error"], "Failed to process request");
    assert_eq!(body["message"], argo_relay::error::UNAVAILABLE_MESSAGE);
}

#[tokio::test]
async fn test_downstream_unreachable_is_502() {
    let audit = Arc::new(FakeAudit::default());
    let webhook = Arc::new(FakeWebhook::replying(|| {
        Err(WebhookError::Transport("operation timed out".to_string()))
    }));

    let resp = app(&audit, &webhook)
        .oneshot(post(r#"{"message": "hello"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    assert_cors(&resp);
}

#[tokio::test]
async fn test_audit_failure_does_not_block_forward() {
    let audit = Arc::new(FakeAudit {
        fail: true,
        ..Default::default()
    });
    let webhook = Arc::new(FakeWebhook::replying(ok_reply));

    let resp = app(&audit, &webhook)
        .oneshot(post(r#"{"user_id": "test-user", "message": "hello"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(read_json(resp).await, ok_reply().unwrap());
    assert_eq!(audit.records.lock().unwrap().len(), 1);
    assert_eq!(webhook.calls().len(), 1);
}

#[tokio::test]
async fn test_malformed_body_is_500() {
    let audit = Arc::new(FakeAudit::default());
    let webhook = Arc::new(FakeWebhook::replying(ok_reply));

    let resp = app(&audit, &webhook)
        .oneshot(post("this is not json"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_cors(&resp);
    let body = read_json(resp).await;
    assert_eq!(body["error"], "Internal server error");
    assert_eq!(body["message"], argo_relay::error::INTERNAL_MESSAGE);
    assert!(webhook.calls().is_empty());
}

#[tokio::test]
async fn test_non_json_downstream_body_is_500() {
    let audit = Arc::new(FakeAudit::default());
    let webhook = Arc::new(FakeWebhook::replying(|| {
        Err(WebhookError::Decode("expected value at line 1".to_string()))
    }));

    let resp = app(&audit, &webhook)
        .oneshot(post(r#"{"message": "hello"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_cors(&resp);
}

#[tokio::test]
async fn test_preflight_short_circuits() {
    let audit = Arc::new(FakeAudit::default());
    let webhook = Arc::new(FakeWebhook::replying(ok_reply));

    let req = Request::builder()
        .method(Method::OPTIONS)
        .uri("/")
        .header(header::ORIGIN, "https://app.argoassist.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type, apikey")
        .body(Body::empty())
        .unwrap();
    let resp = app(&audit, &webhook).oneshot(req).await.unwrap();

    assert!(resp.status().is_success());
    assert_cors(&resp);

    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    assert!(bytes.is_empty());
    assert!(webhook.calls().is_empty());
    assert!(audit.records.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_bare_options_is_answered_empty() {
    let audit = Arc::new(FakeAudit::default());
    let webhook = Arc::new(FakeWebhook::replying(ok_reply));

    for uri in ["/", "/chat"] {
        let req = Request::builder()
            .method(Method::OPTIONS)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let resp = app(&audit, &webhook).oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK, "uri: {uri}");
        assert_cors(&resp);
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.is_empty());
    }
    assert!(webhook.calls().is_empty());
    assert!(audit.records.lock().unwrap().is_empty());
}
