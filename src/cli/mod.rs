//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific
//! modules.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{Settings, DEFAULT_BIND};

#[derive(Parser)]
#[command(name = "sheetscan")]
#[command(about = "Production log sheet OCR capture and data entry system")]
#[command(version)]
pub struct Cli {
    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Data directory holding saved entries (overrides config file)
    #[arg(short, long, global = true, env = "SHEETSCAN_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory and write a starter config file
    Init,

    /// Scan a log sheet image and print the extracted fields
    Scan {
        /// Image file to scan
        image: PathBuf,
        /// Save the derived Start/End rows to the entry store
        #[arg(long)]
        save: bool,
        /// Output the extracted fields as JSON
        #[arg(long)]
        json: bool,
        /// Recognition language tag (overrides config)
        #[arg(long)]
        lang: Option<String>,
        /// OCR backend to use (overrides config)
        #[arg(long)]
        backend: Option<String>,
    },

    /// Start the web interface
    Serve {
        /// Address to bind to (HOST:PORT)
        #[arg(default_value = DEFAULT_BIND)]
        bind: String,
    },

    /// List saved entries
    Entries {
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Limit number of entries shown (0 = unlimited)
        #[arg(short, long, default_value = "50")]
        limit: usize,
    },

    /// Export saved entries as a CSV spreadsheet
    Export {
        /// Output file (default: entries-<date>.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check whether the configured OCR backend is installed
    Check,
}

/// Run the CLI.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref(), cli.data_dir)?;

    match cli.command {
        Commands::Init => commands::cmd_init(&settings),
        Commands::Scan {
            image,
            save,
            json,
            lang,
            backend,
        } => {
            commands::cmd_scan(
                &settings,
                &image,
                save,
                json,
                lang.as_deref(),
                backend.as_deref(),
            )
            .await
        }
        Commands::Serve { bind } => commands::cmd_serve(&settings, &bind).await,
        Commands::Entries { json, limit } => commands::cmd_entries(&settings, json, limit),
        Commands::Export { output } => commands::cmd_export(&settings, output.as_deref()),
        Commands::Check => commands::cmd_check(&settings),
    }
}
