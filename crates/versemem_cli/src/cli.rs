//! CLI argument parsing with clap derive.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Memorize scripture through reading, reciting and review.
#[derive(Debug, Parser)]
#[command(name = "versemem")]
#[command(version = versemem_core::core_version())]
#[command(about = "Memorize scripture through reading, reciting and review")]
pub struct Cli {
    /// SQLite database file (falls back to VERSEMEM_DB_PATH)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error (falls back to VERSEMEM_LOG_LEVEL)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List verses with their practice phase
    List {
        /// Case-insensitive filter over reference, text and notes
        #[arg(long)]
        search: Option<String>,
    },

    /// Add a verse typed by hand
    Add {
        #[arg(long)]
        reference: String,
        #[arg(long)]
        text: String,
        #[arg(long)]
        notes: Option<String>,
    },

    /// Show one verse with its progress
    Show { id: String },

    /// Record one completed reading
    Read { id: String },

    /// Record one recitation attempt
    Recite { id: String },

    /// Mark a verse as reviewed today
    Review { id: String },

    /// Append a practice note
    Note { id: String, text: String },

    /// Delete a verse and its progress
    Delete { id: String },

    /// Dashboard counters
    Stats,

    /// Books available for book/chapter/verse lookup
    Books,

    /// Suggested verses for new users
    Popular,
}
