//! End-to-end runs of `process_conversations` against archives on disk.

use chatgpt_archive_export::{ExportConfig, process_conversations};
use rusqlite::Connection;
use serde_json::json;
use std::fs;
use std::path::Path;

fn config(dir: &Path, archive: &serde_json::Value) -> ExportConfig {
    let input_path = dir.join("conversations.json");
    fs::write(&input_path, serde_json::to_vec(archive).unwrap()).unwrap();
    ExportConfig {
        input_path,
        target_dir: dir.join("out"),
        db_location: dir.join("conversations.db").to_string_lossy().into_owned(),
        verbose: false,
        quiet: true,
    }
}

fn node(role: &str, text: &str, parent: Option<&str>) -> serde_json::Value {
    json!({
        "message": {
            "author": { "role": role },
            "content": { "content_type": "text", "parts": [text] },
            "create_time": 1700000000.0,
            "update_time": null
        },
        "parent": parent
    })
}

fn count(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))
        .unwrap()
}

#[test]
fn writes_transcripts_and_tables() {
    let dir = tempfile::tempdir().unwrap();
    let archive = json!([
        {
            "id": "conv-1",
            "title": "Greeting: hello?",
            "create_time": 1700000000.0,
            "update_time": 1700000500.0,
            "current_node": "B",
            "mapping": {
                "A": node("user", "hi", None),
                "B": node("assistant", "hello", Some("A")),
            }
        },
        {
            "id": "conv-2",
            "title": "Branched",
            "create_time": 1704067200.0,
            "update_time": 1704067300.0,
            "current_node": "a2",
            "mapping": {
                "root": { "message": null, "parent": null },
                "sys": node("system", "hidden", Some("root")),
                "ci": {
                    "message": {
                        "author": { "role": "system" },
                        "content": { "content_type": "text", "parts": ["Be brief."] },
                        "metadata": { "is_user_system_message": true }
                    },
                    "parent": "sys"
                },
                "u1": node("user", "old question", Some("ci")),
                "a1": node("assistant", "old answer", Some("u1")),
                "u2": node("user", "new question", Some("ci")),
                "a2": node("assistant", "new answer", Some("u2")),
            }
        },
        {
            "id": "draft",
            "title": "Never updated",
            "create_time": 1700000000.0,
            "current_node": "A",
            "mapping": { "A": node("user", "lost", None) }
        }
    ]);
    let cfg = config(dir.path(), &archive);

    let written = process_conversations(&cfg);
    assert_eq!(written.len(), 2);

    let first = &written[0];
    assert_eq!(first.directory, dir.path().join("out").join("2023_11"));
    assert_eq!(first.file, first.directory.join("2023_11_14_Greeting__hello_.txt"));
    assert_eq!(fs::read_to_string(&first.file).unwrap(), "user\nhi\nChatGPT\nhello\n");

    let second = fs::read_to_string(&written[1].file).unwrap();
    assert_eq!(written[1].file, dir.path().join("out/2024_01/2024_01_01_Branched.txt"));
    assert_eq!(
        second,
        "Custom user info\nBe brief.\nuser\nnew question\nChatGPT\nnew answer\n"
    );
    assert_eq!(second.lines().count(), 6);

    let conn = Connection::open(dir.path().join("conversations.db")).unwrap();
    assert_eq!(count(&conn, "conversations"), 2);
    assert_eq!(count(&conn, "messages"), 5);
    let drafts: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM messages WHERE conversation_id = 'draft'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(drafts, 0);

    let mut stmt = conn
        .prepare("SELECT author, text FROM messages WHERE conversation_id = 'conv-2' ORDER BY rowid")
        .unwrap();
    let rows: Vec<(String, String)> = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(
        rows,
        vec![
            ("Custom user info".to_string(), "Be brief.".to_string()),
            ("user".to_string(), "new question".to_string()),
            ("ChatGPT".to_string(), "new answer".to_string()),
        ]
    );

    assert!(!dir.path().join("out/2023_11/2023_11_14_Never_updated.txt").exists());
}

#[test]
fn rerun_replaces_previous_output() {
    let dir = tempfile::tempdir().unwrap();
    let before = json!([{
        "id": "c", "title": "T", "create_time": 0, "update_time": 1,
        "current_node": "b",
        "mapping": { "a": node("user", "q", None), "b": node("assistant", "r", Some("a")) }
    }]);
    process_conversations(&config(dir.path(), &before));

    let after = json!([{
        "id": "c", "title": "T", "create_time": 0, "update_time": 2,
        "current_node": "a",
        "mapping": { "a": node("user", "q", None), "b": node("assistant", "r", Some("a")) }
    }]);
    let written = process_conversations(&config(dir.path(), &after));

    assert_eq!(written.len(), 1);
    assert_eq!(written[0].file, dir.path().join("out/1970_01/1970_01_01_T.txt"));
    assert_eq!(fs::read_to_string(&written[0].file).unwrap(), "user\nq\n");

    let conn = Connection::open(dir.path().join("conversations.db")).unwrap();
    assert_eq!(count(&conn, "conversations"), 1);
    assert_eq!(count(&conn, "messages"), 1);
}

#[test]
fn unreadable_input_yields_empty_result() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = ExportConfig {
        input_path: dir.path().join("missing.json"),
        target_dir: dir.path().join("out"),
        db_location: dir.path().join("c.db").to_string_lossy().into_owned(),
        verbose: false,
        quiet: true,
    };
    assert!(process_conversations(&cfg).is_empty());

    fs::write(&cfg.input_path, "[{ truncated").unwrap();
    assert!(process_conversations(&cfg).is_empty());
    assert!(!cfg.target_dir.exists());
}

#[test]
fn storage_failure_yields_empty_result() {
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = config(
        dir.path(),
        &json!([{ "id": "c", "update_time": 1, "current_node": "a",
                  "mapping": { "a": node("user", "q", None) } }]),
    );
    // A directory cannot be opened as a database file.
    cfg.db_location = dir.path().to_string_lossy().into_owned();

    assert!(process_conversations(&cfg).is_empty());
    assert!(!cfg.target_dir.exists());
}
