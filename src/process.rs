use crate::exporter::{self, WrittenTranscript};
use crate::importer::load_archive;
use crate::records::{RecordSet, shape_conversations};
use crate::store;
use crate::utils::ExportConfig;
use eyre::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, info};

/// The main entry point for the business logic.
///
/// Loads the archive, rebuilds every active transcript, replaces the database
/// tables and writes one text file per conversation. Failures are logged and
/// reported as an empty result; they never escape.
pub fn process_conversations(config: &ExportConfig) -> Vec<WrittenTranscript> {
    match run(config) {
        Ok(written) => written,
        Err(e) => {
            error!("Error processing conversations: {:#}", e);
            Vec::new()
        }
    }
}

fn run(config: &ExportConfig) -> Result<Vec<WrittenTranscript>> {
    let conversations = match load_archive(&config.input_path) {
        Ok(c) => c,
        Err(e) => {
            error!("{:#}", e);
            return Ok(Vec::new());
        }
    };
    if conversations.is_empty() {
        info!("Archive contains no conversations.");
        return Ok(Vec::new());
    }

    let shaped = shape_conversations(&conversations);
    let records = RecordSet::from_shaped(&shaped);
    info!(
        "Found {} conversations, {} exportable with {} messages.",
        conversations.len(),
        records.conversations.len(),
        records.messages.len()
    );

    let mut conn = store::open_store(&config.db_location)?;
    store::save_records(&mut conn, &records)
        .wrap_err_with(|| format!("Failed to save records to {}", config.db_location))?;
    drop(conn);

    let pb = if config.quiet {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(shaped.len() as u64);
        bar.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%)",
            )
            .wrap_err("Invalid progress template")?
            .progress_chars("=>-"),
        );
        bar
    };

    let mut written = Vec::with_capacity(shaped.len());
    for conv in &shaped {
        let entry = exporter::export_transcript(
            &config.target_dir,
            &conv.record.title,
            conv.record.create_time,
            &conv.messages,
        )
        .wrap_err_with(|| format!("Failed to export conversation {}", conv.record.conversation_id))?;
        if config.verbose {
            pb.println(format!("Wrote:  {}", entry.file.display()));
        }
        written.push(entry);
        pb.inc(1);
    }
    pb.finish_and_clear();

    info!("Done. {} transcripts written.", written.len());
    Ok(written)
}
