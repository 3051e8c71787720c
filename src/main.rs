use chatgpt_archive_export::{ExportConfig, process_conversations};
use clap::Parser;
use eyre::{Context, Result, eyre};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Export a ChatGPT conversation archive to text transcripts and SQLite.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// The conversations.json file from a ChatGPT data export.
    /// Defaults to ./conversations.json if not set in config.
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Directory to write transcripts into.
    /// Defaults to ./ChatGPT_Convos if not set in config.
    #[arg(value_name = "OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// SQLite database path or sqlite:/// URI.
    /// Defaults to conversations.db if not set in config.
    #[arg(long, value_name = "LOCATION")]
    db: Option<String>,

    /// Path to a specific configuration file.
    /// Defaults to $XDG_CONFIG_HOME/chatgpt-archive-export/config.toml
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log each file written and each conversation skipped.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress progress bar and the per-file report.
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Deserialize, Default)]
struct FileConfig {
    input: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    db: Option<String>,
}

fn load_file_config(explicit_path: Option<&Path>) -> Result<FileConfig> {
    let path = if let Some(p) = explicit_path {
        if !p.exists() {
            return Err(eyre!("Config file not found: {}", p.display()));
        }
        Some(p.to_path_buf())
    } else {
        dirs::config_dir()
            .map(|d| d.join("chatgpt-archive-export/config.toml"))
            .filter(|p| p.exists())
    };

    match path {
        None => Ok(FileConfig::default()),
        Some(p) => {
            let content = fs::read_to_string(&p)
                .wrap_err_with(|| format!("Failed to read config: {}", p.display()))?;
            toml::from_str(&content)
                .wrap_err_with(|| format!("Failed to parse config: {}", p.display()))
        }
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("chatgpt_archive_export={}", level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    // 1. Load config file (CLI path > default path)
    let file_cfg = load_file_config(cli.config.as_deref())?;

    // 2. Resolve paths (CLI > Config > Default)
    let input_path = cli
        .input
        .or(file_cfg.input)
        .unwrap_or_else(|| PathBuf::from("conversations.json"));
    let target_dir = cli
        .output_dir
        .or(file_cfg.output_dir)
        .unwrap_or_else(|| PathBuf::from("ChatGPT_Convos"));
    let db_location = cli
        .db
        .or(file_cfg.db)
        .unwrap_or_else(|| "conversations.db".to_string());

    let config = ExportConfig {
        input_path,
        target_dir,
        db_location,
        verbose: cli.verbose,
        quiet: cli.quiet,
    };

    // 3. Run the business logic
    let written = process_conversations(&config);

    if !config.quiet {
        for entry in &written {
            println!(
                "Created {} in directory {}",
                entry.file.display(),
                entry.directory.display()
            );
        }
    }

    Ok(())
}
