//! Argo Memory - audit log of chat messages
//!
//! Every message the relay receives is written to the `memory` table before
//! it is forwarded. Writes are best-effort: callers log failures and carry on.

pub mod audit;
pub mod supabase;

pub use audit::{AuditContent, AuditError, AuditLog, AuditRecord, DisabledAuditLog};
pub use supabase::SupabaseAuditLog;
