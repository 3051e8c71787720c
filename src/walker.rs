use crate::importer::Node;
use crate::messages::{self, NormalizedMessage};
use std::collections::{HashMap, HashSet};
use tracing::warn;

/// Reconstruct the active transcript of a conversation.
///
/// Starts at `current_node` and follows parent links up to the root, keeping
/// every message that qualifies. Nodes without a message are passed through.
/// The walk ends at a node without a parent, at a parent id that is not in the
/// mapping, or at a node already visited. Output is root-first.
pub fn active_messages(
    mapping: &HashMap<String, Node>,
    current_node: Option<&str>,
) -> Vec<NormalizedMessage> {
    let mut collected = Vec::new();
    let mut visited = HashSet::new();
    let mut cursor = current_node.filter(|id| !id.is_empty());

    while let Some(id) = cursor {
        if !visited.insert(id) {
            warn!(node = id, "Cycle in message tree, stopping walk");
            break;
        }
        let Some(node) = mapping.get(id) else {
            break;
        };
        if let Some(normalized) = node.message.as_ref().and_then(messages::normalize) {
            collected.push(normalized);
        }
        cursor = node.parent.as_deref();
    }

    collected.reverse();
    collected
}
