//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Milon: word-data pipeline for an English-Hebrew vocabulary dataset
#[derive(Parser)]
#[command(name = "milon")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fill missing translations and sentences for one batch of words
    Process {
        /// Path to the word collection JSON file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Dataset selector: a CEFR level (a1..c2), "placeholders", or "all"
        #[arg(short = 't', long = "type", default_value = "placeholders")]
        category: String,

        /// Offset into the selected queue
        #[arg(long, default_value = "0")]
        start: usize,

        /// Maximum items to process this run
        #[arg(long, default_value = "50")]
        count: usize,

        /// Continue from the last checkpoint instead of --start
        #[arg(long)]
        resume: bool,

        /// Provider settings file (JSON)
        #[arg(short, long)]
        settings: Option<PathBuf>,

        /// Force offline adapters regardless of settings
        #[arg(long)]
        offline: bool,
    },

    /// Run batches back to back until the whole queue is processed
    ProcessAll {
        /// Path to the word collection JSON file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Dataset selector: a CEFR level (a1..c2), "placeholders", or "all"
        #[arg(short = 't', long = "type", default_value = "placeholders")]
        category: String,

        /// Items per batch
        #[arg(long, default_value = "50")]
        batch_size: usize,

        /// Provider settings file (JSON)
        #[arg(short, long)]
        settings: Option<PathBuf>,

        /// Force offline adapters regardless of settings
        #[arg(long)]
        offline: bool,
    },

    /// Audit dataset quality and write a verification report
    Verify {
        /// Path to the word collection JSON file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output path for the report (default: <file>.report.json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the report as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Show checkpoint state and dataset completeness
    Status {
        /// Path to the word collection JSON file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}
