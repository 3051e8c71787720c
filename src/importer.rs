//! Type definitions for the ChatGPT data export (`conversations.json`).
//!
//! The archive is a single JSON array. Each element is a conversation whose
//! messages live in a node-id keyed `mapping`; every node points at its parent,
//! and `current_node` names the leaf of the branch that was selected last.
//!
//! ```json
//! [{
//!   "id": "67a1...",
//!   "title": "Sourdough starter",
//!   "create_time": 1700000000.123,
//!   "update_time": 1700000400.5,
//!   "current_node": "c3",
//!   "mapping": {
//!     "root": { "message": null, "parent": null },
//!     "c1":   { "message": { "author": { "role": "user" }, ... }, "parent": "root" }
//!   }
//! }]
//! ```
//!
//! Every field is optional. Exports produced over the years disagree on which
//! keys are present and which are `null`, so the loader never rejects a
//! conversation for a missing field; defaults are applied downstream.
use std::{collections::HashMap, fs::File, io::BufReader, path::Path};

use eyre::{Context, Result};
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Conversation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Conversation {
    pub id: Option<String>,
    pub title: Option<String>,
    /// Epoch seconds, fractional.
    pub create_time: Option<f64>,
    /// Epoch seconds, fractional. Conversations without one are not exported.
    pub update_time: Option<f64>,
    pub current_node: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub mapping: HashMap<String, Node>,
}

impl Conversation {
    pub fn id_or_default(&self) -> &str {
        self.id.as_deref().unwrap_or("Unknown")
    }

    pub fn title_or_default(&self) -> &str {
        self.title.as_deref().unwrap_or("Untitled")
    }
}

/// One vertex of the message tree.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Node {
    pub message: Option<Message>,
    pub parent: Option<String>,
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Message {
    #[serde(deserialize_with = "null_as_default")]
    pub author: Author,
    pub content: Option<Content>,
    pub create_time: Option<f64>,
    pub update_time: Option<f64>,
    pub metadata: Option<MessageMetadata>,
}

impl Message {
    /// Raw author role as stored in the export (`"user"`, `"assistant"`, `"system"`, `"tool"`, ...).
    pub fn role(&self) -> &str {
        self.author.role.as_deref().unwrap_or("")
    }

    /// Set on system messages that carry the user's own custom instructions.
    pub fn is_user_system_message(&self) -> bool {
        self.metadata
            .as_ref()
            .and_then(|m| m.is_user_system_message)
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Author {
    pub role: Option<String>,
}

/// Message body. `parts` is a list of strings for `"text"` content; other
/// content types (`"code"`, `"multimodal_text"`, ...) mix in objects.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Content {
    pub content_type: Option<String>,
    pub parts: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MessageMetadata {
    pub is_user_system_message: Option<bool>,
}

/// Treat an explicit `null` the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Read and parse the whole archive into memory.
pub fn load_archive(path: &Path) -> Result<Vec<Conversation>> {
    let file = File::open(path)
        .wrap_err_with(|| format!("Failed to open archive: {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .wrap_err_with(|| format!("Failed to parse archive: {}", path.display()))
}
