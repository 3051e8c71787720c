use crate::importer::Message;
use crate::utils::epoch_to_utc;
use chrono::{DateTime, Utc};
use serde_json::Value;

/// A message as it appears in transcripts and in the `messages` table.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedMessage {
    pub author: String,
    pub text: String,
    pub create_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
}

/// Text parts of a message. Empty unless the content type is `"text"`.
pub fn extract_parts(message: &Message) -> &[Value] {
    match &message.content {
        Some(content) if content.content_type.as_deref() == Some("text") => {
            content.parts.as_deref().unwrap_or(&[])
        }
        _ => &[],
    }
}

/// Display name for a raw author role.
pub fn author_name(role: &str) -> &str {
    match role {
        "assistant" => "ChatGPT",
        "system" => "Custom user info",
        other => other,
    }
}

/// First text part, if it is a non-empty string.
fn first_text(message: &Message) -> Option<&str> {
    extract_parts(message)
        .first()
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
}

/// Whether a message belongs in the visible transcript.
///
/// System messages only qualify when they hold the user's custom instructions.
/// The decision looks at the raw role; the display name is irrelevant here.
pub fn qualifies(message: &Message) -> bool {
    first_text(message).is_some()
        && (message.role() != "system" || message.is_user_system_message())
}

/// Filter and normalize in one step. Returns `None` for messages that do not qualify.
pub fn normalize(message: &Message) -> Option<NormalizedMessage> {
    if !qualifies(message) {
        return None;
    }
    let text = first_text(message)?;
    Some(NormalizedMessage {
        author: author_name(message.role()).to_string(),
        text: text.to_string(),
        create_time: epoch_to_utc(message.create_time.unwrap_or(0.0)),
        update_time: epoch_to_utc(message.update_time.unwrap_or(0.0)),
    })
}
