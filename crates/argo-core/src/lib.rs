//! Argo Core - chat session, relay client, and dashboard state
//!
//! This crate contains the logic shared by every Argo front end
//! (terminal dashboard, one-shot CLI, future web UI). The relay server
//! lives in `argo-relay` and reuses the wire types defined here.

pub mod config;
pub mod message;
pub mod panels;
pub mod reply;
pub mod session;
pub mod transport;
pub mod wire;

pub use config::{ArgoConfig, ConfigError, RelayConfig};
pub use message::{Message, Sender};
pub use reply::extract_reply;
pub use session::{ChatSession, Notice, PendingRequest, SessionEvent};
pub use transport::{HttpRelayClient, RelayError, RelayTransport};
pub use wire::ChatRequest;
