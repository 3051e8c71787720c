use crate::records::RecordSet;
use crate::utils::sqlite_path;
use eyre::{Context, Result};
use rusqlite::{Connection, params};

const SCHEMA: &str = "
DROP TABLE IF EXISTS conversations;
DROP TABLE IF EXISTS messages;
CREATE TABLE conversations (
    conversation_id TEXT,
    title           TEXT,
    create_time     TIMESTAMP,
    update_time     TIMESTAMP
);
CREATE TABLE messages (
    conversation_id TEXT,
    author          TEXT,
    text            TEXT,
    create_time     TIMESTAMP,
    update_time     TIMESTAMP
);
";

/// Open (or create) the SQLite database at a storage location.
pub fn open_store(location: &str) -> Result<Connection> {
    let path = sqlite_path(location);
    Connection::open(path)
        .wrap_err_with(|| format!("Failed to open database: {}", path.display()))
}

/// Replace the `conversations` and `messages` tables with the given rows.
///
/// Runs in a single transaction: either both tables are replaced or neither is.
pub fn save_records(conn: &mut Connection, records: &RecordSet) -> Result<()> {
    let tx = conn.transaction().wrap_err("Failed to begin transaction")?;
    tx.execute_batch(SCHEMA)
        .wrap_err("Failed to recreate tables")?;

    {
        let mut stmt = tx
            .prepare(
                "INSERT INTO conversations (conversation_id, title, create_time, update_time)
                 VALUES (?1, ?2, ?3, ?4)",
            )
            .wrap_err("Failed to prepare conversation insert")?;
        for c in &records.conversations {
            stmt.execute(params![c.conversation_id, c.title, c.create_time, c.update_time])
                .wrap_err_with(|| format!("Failed to insert conversation {}", c.conversation_id))?;
        }

        let mut stmt = tx
            .prepare(
                "INSERT INTO messages (conversation_id, author, text, create_time, update_time)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )
            .wrap_err("Failed to prepare message insert")?;
        for m in &records.messages {
            stmt.execute(params![
                m.conversation_id,
                m.author,
                m.text,
                m.create_time,
                m.update_time
            ])
            .wrap_err_with(|| format!("Failed to insert message of {}", m.conversation_id))?;
        }
    }

    tx.commit().wrap_err("Failed to commit")
}
