//! Reply text extraction from relay responses
//!
//! The webhook owns the response shape. Known shapes, in priority order:
//! - `{"reply_message": "..."}`
//! - `{"data": {"message": "..."}}`
//! - `{"data": {"response": "..."}}`

use serde_json::Value;

/// Shown when a successful response carries none of the known reply fields
pub const FALLBACK_REPLY: &str = "I received your message, but I don't have a response right now.";

/// Pull the assistant's reply text out of a relay response body.
///
/// Empty strings and non-string values count as absent.
pub fn extract_reply(body: &Value) -> String {
    [
        body.get("reply_message"),
        body.pointer("/data/message"),
        body.pointer("/data/response"),
    ]
    .into_iter()
    .flatten()
    .filter_map(Value::as_str)
    .find(|text| !text.is_empty())
    .unwrap_or(FALLBACK_REPLY)
    .to_string()
}
