//! Milon CLI - batch word-data acquisition and verification.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let result = match cli.command {
        Commands::Process {
            file,
            category,
            start,
            count,
            resume,
            settings,
            offline,
        } => commands::process::run(file, category, start, count, resume, settings, offline),

        Commands::ProcessAll {
            file,
            category,
            batch_size,
            settings,
            offline,
        } => commands::process_all::run(file, category, batch_size, settings, offline),

        Commands::Verify { file, output, json } => commands::verify::run(file, output, json),

        Commands::Status { file } => commands::status::run(file),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
