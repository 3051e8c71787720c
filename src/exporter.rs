use crate::messages::NormalizedMessage;
use chrono::{DateTime, Utc};
use eyre::{Context, Result};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use unicode_normalization::UnicodeNormalization;

const MAX_TITLE_CHARS: usize = 140;

/// Where a transcript ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenTranscript {
    pub directory: PathBuf,
    pub file: PathBuf,
}

/// Make a title safe for use as a file name on every major platform.
///
/// NFKC-normalizes, replaces `<>:"/\|?*`, ASCII control characters and any
/// whitespace with `_`, then keeps at most 140 characters.
pub fn sanitize_title(title: &str) -> String {
    title
        .nfkc()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            '\x00'..='\x1f' => '_',
            c if c.is_whitespace() => '_',
            c => c,
        })
        .take(MAX_TITLE_CHARS)
        .collect()
}

/// `<base>/<YYYY_MM>`
pub fn month_directory(base_dir: &Path, date: DateTime<Utc>) -> PathBuf {
    base_dir.join(date.format("%Y_%m").to_string())
}

/// `<YYYY_MM_DD>_<sanitized title>.txt`
pub fn transcript_file_name(title: &str, date: DateTime<Utc>) -> String {
    format!("{}_{}.txt", date.format("%Y_%m_%d"), sanitize_title(title))
}

/// Author line, then text line, for each message.
pub fn write_transcript<W: Write>(
    writer: &mut W,
    messages: &[NormalizedMessage],
) -> std::io::Result<()> {
    for msg in messages {
        writeln!(writer, "{}", msg.author)?;
        writeln!(writer, "{}", msg.text)?;
    }
    Ok(())
}

/// Create the month directory and (over)write the transcript file inside it.
pub fn export_transcript(
    base_dir: &Path,
    title: &str,
    date: DateTime<Utc>,
    messages: &[NormalizedMessage],
) -> Result<WrittenTranscript> {
    let directory = month_directory(base_dir, date);
    fs::create_dir_all(&directory)
        .wrap_err_with(|| format!("Failed to create directory: {}", directory.display()))?;

    let file = directory.join(transcript_file_name(title, date));
    let handle =
        File::create(&file).wrap_err_with(|| format!("Failed to create: {}", file.display()))?;
    let mut writer = BufWriter::new(handle);
    write_transcript(&mut writer, messages)
        .wrap_err_with(|| format!("Failed to write: {}", file.display()))?;
    writer
        .flush()
        .wrap_err_with(|| format!("Failed to flush: {}", file.display()))?;

    Ok(WrittenTranscript { directory, file })
}
