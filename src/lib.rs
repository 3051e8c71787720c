//! # chatgpt-archive-export
//!
//! Converts a ChatGPT data export (`conversations.json`) into plain-text
//! transcripts and a SQLite database.
//!
//! ## What it does
//!
//! ChatGPT stores each conversation as a tree: every edit or regeneration
//! starts a new branch, and `current_node` marks the leaf that was selected
//! last. This tool walks from that leaf back to the root, drops hidden system
//! prompts and empty nodes, and writes the resulting linear transcript:
//!
//! - as `<output>/<YYYY_MM>/<YYYY_MM_DD>_<title>.txt`, two lines per message
//!   (author, then text);
//! - as rows of the `conversations` and `messages` tables in SQLite.
//!
//! Both outputs are fully replaced on every run.
//!
//! ## Usage
//!
//! ```sh
//! # Defaults: ./conversations.json -> ./ChatGPT_Convos and ./conversations.db
//! chatgpt-archive-export
//!
//! # Explicit paths
//! chatgpt-archive-export ~/Downloads/export/conversations.json ~/notes/chatgpt --db ~/notes/chatgpt.db
//! ```
//!
//! Defaults can be persisted in `~/.config/chatgpt-archive-export/config.toml`.
pub mod exporter;
pub mod importer;
pub mod messages;
pub mod process;
pub mod records;
pub mod store;
pub mod utils;
pub mod walker;

pub use exporter::WrittenTranscript;
pub use process::process_conversations;
pub use utils::ExportConfig;
