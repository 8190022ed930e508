//! Audit records and the storage trait

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Source tag for messages that came in through the chat UI
pub const SOURCE_UI: &str = "ui";

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("Not connected")]
    NotConnected,

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Insert failed: HTTP {status}: {body}")]
    InsertFailed { status: u16, body: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditContent {
    pub input: String,
}

/// One row in the memory table: `{user_id, content: {input}, source}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub user_id: Option<String>,
    pub content: AuditContent,
    pub source: String,
}

impl AuditRecord {
    /// Record for a message typed into the chat UI
    pub fn from_ui(user_id: Option<String>, input: impl Into<String>) -> Self {
        Self {
            user_id,
            content: AuditContent {
                input: input.into(),
            },
            source: SOURCE_UI.to_string(),
        }
    }
}

/// Storage for audit records
#[async_trait]
pub trait AuditLog: Send + Sync {
    async fn insert(&self, record: &AuditRecord) -> Result<(), AuditError>;
}

/// Used when no database is configured. Every insert reports `NotConnected`,
/// which the relay logs and ignores like any other audit failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledAuditLog;

#[async_trait]
impl AuditLog for DisabledAuditLog {
    async fn insert(&self, _record: &AuditRecord) -> Result<(), AuditError> {
        Err(AuditError::NotConnected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_shape() {
        let record = AuditRecord::from_ui(Some("test-user".to_string()), "hello");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "user_id": "test-user",
                "content": { "input": "hello" },
                "source": "ui"
            })
        );
    }

    #[test]
    fn test_missing_user_id_is_null() {
        let record = AuditRecord::from_ui(None, "hello");
        let json = serde_json::to_value(&record).unwrap();
        assert!(json["user_id"].is_null());
    }

    #[tokio::test]
    async fn test_disabled_log_reports_not_connected() {
        let record = AuditRecord::from_ui(None, "hello");
        assert!(matches!(
            DisabledAuditLog.insert(&record).await,
            Err(AuditError::NotConnected)
        ));
    }
}
