//! Supabase integration for the audit log
//!
//! Inserts go through the PostgREST endpoint (`/rest/v1/<table>`) using the
//! service role key, so no database driver is needed.

use async_trait::async_trait;

use crate::audit::{AuditError, AuditLog, AuditRecord};

pub struct SupabaseAuditLog {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    table: String,
}

impl SupabaseAuditLog {
    pub fn new(base_url: &str, api_key: &str, table: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, api_key, table)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str, api_key: &str, table: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            table: table.to_string(),
        }
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }
}

#[async_trait]
impl AuditLog for SupabaseAuditLog {
    async fn insert(&self, record: &AuditRecord) -> Result<(), AuditError> {
        let resp = self
            .client
            .post(self.table_url())
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .header("Prefer", "return=minimal")
            .json(record)
            .send()
            .await
            .map_err(|e| AuditError::Request(e.to_string()))?;

        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = resp.text().await.unwrap_or_default();
            Err(AuditError::InsertFailed {
                status: status.as_u16(),
                body,
            })
        }
    }
}
