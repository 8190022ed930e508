//! Argo Relay - forwards chat messages from the UI to the automation webhook
//!
//! One stateless POST handler: validate, audit-log (best-effort), forward,
//! relay the webhook's JSON back. CORS is permissive on every response.

pub mod error;
pub mod handler;
pub mod webhook;

pub use error::RelayFailure;
pub use handler::{relay, router, serve, RelayState};
pub use webhook::{Forwarder, WebhookError, WebhookForwarder};
