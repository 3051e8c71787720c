use crate::importer::Conversation;
use crate::messages::NormalizedMessage;
use crate::utils::epoch_to_utc;
use crate::walker::active_messages;
use chrono::{DateTime, Utc};
use tracing::debug;

/// Row of the `conversations` table.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationRecord {
    pub conversation_id: String,
    pub title: String,
    pub create_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
}

/// Row of the `messages` table.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageRecord {
    pub conversation_id: String,
    pub author: String,
    pub text: String,
    pub create_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
}

/// A conversation together with its active transcript.
#[derive(Debug, Clone)]
pub struct ShapedConversation {
    pub record: ConversationRecord,
    pub messages: Vec<NormalizedMessage>,
}

impl ShapedConversation {
    pub fn message_records(&self) -> impl Iterator<Item = MessageRecord> + '_ {
        self.messages.iter().map(|m| MessageRecord {
            conversation_id: self.record.conversation_id.clone(),
            author: m.author.clone(),
            text: m.text.clone(),
            create_time: m.create_time,
            update_time: m.update_time,
        })
    }
}

/// The two flat record sets handed to storage.
#[derive(Debug, Clone, Default)]
pub struct RecordSet {
    pub conversations: Vec<ConversationRecord>,
    pub messages: Vec<MessageRecord>,
}

impl RecordSet {
    pub fn from_shaped(shaped: &[ShapedConversation]) -> Self {
        Self {
            conversations: shaped.iter().map(|s| s.record.clone()).collect(),
            messages: shaped.iter().flat_map(|s| s.message_records()).collect(),
        }
    }
}

/// Walk every conversation that has an update time. Input order is preserved.
pub fn shape_conversations(conversations: &[Conversation]) -> Vec<ShapedConversation> {
    conversations
        .iter()
        .filter_map(|conv| {
            let Some(updated) = conv.update_time.filter(|t| *t != 0.0) else {
                debug!(id = conv.id_or_default(), "Skipping conversation without update_time");
                return None;
            };
            Some(ShapedConversation {
                record: ConversationRecord {
                    conversation_id: conv.id_or_default().to_string(),
                    title: conv.title_or_default().to_string(),
                    create_time: epoch_to_utc(conv.create_time.unwrap_or(0.0)),
                    update_time: epoch_to_utc(updated),
                },
                messages: active_messages(&conv.mapping, conv.current_node.as_deref()),
            })
        })
        .collect()
}
