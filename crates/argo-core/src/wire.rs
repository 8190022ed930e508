//! JSON bodies exchanged between the UI, the relay, and the webhook

use serde::{Deserialize, Serialize};

/// `{user_id, message}` as posted by the UI and forwarded to the webhook.
///
/// Both fields are optional on the wire so the relay can report a missing
/// message itself instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ChatRequest {
    pub fn new(user_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            message: Some(message.into()),
        }
    }

    /// The message text, if present and non-empty
    pub fn message_text(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_deserialize() {
        let req: ChatRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.user_id, None);
        assert_eq!(req.message_text(), None);

        let req: ChatRequest = serde_json::from_str(r#"{"message": ""}"#).unwrap();
        assert_eq!(req.message_text(), None);
    }

    #[test]
    fn test_absent_user_id_is_omitted() {
        let req = ChatRequest {
            user_id: None,
            message: Some("hi".to_string()),
        };
        assert_eq!(serde_json::to_string(&req).unwrap(), r#"{"message":"hi"}"#);
    }
}
