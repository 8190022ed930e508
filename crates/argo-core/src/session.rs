//! Chat session - the message log and its single-request lifecycle
//!
//! A send goes through two halves so front ends can keep drawing while the
//! relay call is in flight:
//!
//! 1. [`ChatSession::begin`] appends the user message, marks the session
//!    pending, appends the "thinking" placeholder, and hands back a
//!    [`PendingRequest`].
//! 2. [`ChatSession::settle`] consumes that token with the relay outcome,
//!    removes the placeholder, appends the terminal assistant message, and
//!    clears the pending flag.
//!
//! [`ChatSession::submit`] runs both halves around a [`RelayTransport`] call.
//! `PendingRequest` is not `Clone`, so every begun request settles exactly
//! once.

use serde_json::Value;
use uuid::Uuid;

use crate::message::Message;
use crate::reply::extract_reply;
use crate::transport::{RelayError, RelayTransport};
use crate::wire::ChatRequest;

/// Caller identifier used when nothing else is configured
pub const DEFAULT_USER_ID: &str = "test-user";

/// Text of the transient placeholder shown while a request is in flight
pub const THINKING_TEXT: &str = "Processing your request...";

/// Appended in place of a reply when the relay call fails
pub const APOLOGY_TEXT: &str =
    "I'm sorry, I couldn't process your request right now. Please try again.";

/// Opening line for sessions started with [`ChatSession::with_greeting`]
pub const GREETING_TEXT: &str =
    "Welcome back. I'm ready to assist you with your tasks. What would you like me to do today?";

const PLACEHOLDER_PREFIX: &str = "thinking-";

/// User-visible notification raised when a send fails
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub title: String,
    pub description: String,
}

impl Notice {
    fn communication_error(err: &RelayError) -> Self {
        Self {
            title: "Communication error".to_string(),
            description: format!("There was a problem communicating with Argo: {}", err),
        }
    }
}

/// Observable effects of a send, in the order they happen
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// The user's message was appended
    UserMessage(Message),
    /// The session became pending and the placeholder was appended
    Thinking(Message),
    /// The request is about to go to the relay
    RequestIssued(ChatRequest),
    /// The placeholder with this id was removed
    PlaceholderRemoved(String),
    /// A reply was appended
    Reply(Message),
    /// The apology was appended and a notice raised
    Failed { message: Message, notice: Notice },
    /// Pending was cleared
    Settled,
}

/// Token for a request that has begun but not yet settled
#[derive(Debug)]
pub struct PendingRequest {
    placeholder_id: String,
    request: ChatRequest,
}

impl PendingRequest {
    pub fn request(&self) -> &ChatRequest {
        &self.request
    }

    pub fn placeholder_id(&self) -> &str {
        &self.placeholder_id
    }
}

/// One conversation with the assistant
pub struct ChatSession {
    id: Uuid,
    user_id: String,
    messages: Vec<Message>,
    pending: bool,
    next_seq: u64,
    notices: Vec<Notice>,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new(DEFAULT_USER_ID)
    }
}

impl ChatSession {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            messages: Vec::new(),
            pending: false,
            next_seq: 1,
            notices: Vec::new(),
        }
    }

    /// Start the log with the assistant's welcome line
    pub fn with_greeting(mut self) -> Self {
        let id = self.next_id("msg-");
        self.messages.push(Message::assistant(id, GREETING_TEXT));
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Whether a message is the transient "thinking" entry
    pub fn is_placeholder(message: &Message) -> bool {
        message.id.starts_with(PLACEHOLDER_PREFIX)
    }

    /// Drain notices raised since the last call
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Send `text` through `transport` and record the outcome.
    ///
    /// Returns false without touching the log when the text is blank or a
    /// request is already pending.
    pub async fn submit<T>(&mut self, transport: &T, text: &str) -> bool
    where
        T: RelayTransport + ?Sized,
    {
        self.submit_with(transport, text, |_| {}).await
    }

    /// Like [`submit`](Self::submit), reporting each effect to `on_event`
    pub async fn submit_with<T, F>(&mut self, transport: &T, text: &str, mut on_event: F) -> bool
    where
        T: RelayTransport + ?Sized,
        F: FnMut(SessionEvent),
    {
        let Some(pending) = self.begin_with(text, &mut on_event) else {
            return false;
        };

        on_event(SessionEvent::RequestIssued(pending.request.clone()));
        let outcome = transport.send(&pending.request).await;

        self.settle_with(pending, outcome, &mut on_event);
        true
    }

    /// First half of a send. None if the text is blank or a request is pending.
    pub fn begin(&mut self, text: &str) -> Option<PendingRequest> {
        self.begin_with(text, &mut |_| {})
    }

    /// Second half of a send. Returns the terminal assistant message.
    pub fn settle(
        &mut self,
        pending: PendingRequest,
        outcome: Result<Value, RelayError>,
    ) -> &Message {
        self.settle_with(pending, outcome, &mut |_| {})
    }

    fn begin_with(
        &mut self,
        text: &str,
        on_event: &mut dyn FnMut(SessionEvent),
    ) -> Option<PendingRequest> {
        if text.trim().is_empty() || self.pending {
            return None;
        }

        let user_msg = Message::user(self.next_id("msg-"), text);
        self.messages.push(user_msg.clone());
        on_event(SessionEvent::UserMessage(user_msg));

        self.pending = true;
        let placeholder = Message::assistant(self.next_id(PLACEHOLDER_PREFIX), THINKING_TEXT);
        let placeholder_id = placeholder.id.clone();
        self.messages.push(placeholder.clone());
        on_event(SessionEvent::Thinking(placeholder));

        Some(PendingRequest {
            placeholder_id,
            request: ChatRequest::new(self.user_id.clone(), text),
        })
    }

    fn settle_with(
        &mut self,
        pending: PendingRequest,
        outcome: Result<Value, RelayError>,
        on_event: &mut dyn FnMut(SessionEvent),
    ) -> &Message {
        self.messages.retain(|m| m.id != pending.placeholder_id);
        on_event(SessionEvent::PlaceholderRemoved(pending.placeholder_id));

        let id = self.next_id("msg-");
        match outcome {
            Ok(body) => {
                let reply = Message::assistant(id, extract_reply(&body));
                self.messages.push(reply.clone());
                on_event(SessionEvent::Reply(reply));
            }
            Err(err) => {
                tracing::warn!(session = %self.id, error = %err, "chat relay call failed");
                let apology = Message::assistant(id, APOLOGY_TEXT);
                let notice = Notice::communication_error(&err);
                self.messages.push(apology.clone());
                self.notices.push(notice.clone());
                on_event(SessionEvent::Failed {
                    message: apology,
                    notice,
                });
            }
        }

        self.pending = false;
        on_event(SessionEvent::Settled);

        // Just pushed above
        &self.messages[self.messages.len() - 1]
    }

    fn next_id(&mut self, prefix: &str) -> String {
        let id = format!("{}{}", prefix, self.next_seq);
        self.next_seq += 1;
        id
    }
}
