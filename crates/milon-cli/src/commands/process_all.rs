//! Process-all command - chain batches until the queue is exhausted.

use std::path::PathBuf;

use colored::Colorize;
use milon::batch::{BatchChain, BatchOptions, BatchProcessor, Category};

pub fn run(
    file: PathBuf,
    category: String,
    batch_size: usize,
    settings: Option<PathBuf>,
    offline: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let category: Category = category.parse()?;
    let services = super::services(settings, offline)?;

    println!(
        "{} {} ({}, batches of {})",
        "Processing all of".cyan().bold(),
        file.display().to_string().white(),
        category,
        batch_size
    );

    let processor = BatchProcessor::new(
        &file,
        services.translator()?,
        services.sentence_generator()?,
    );
    let summary = BatchChain::new(processor, batch_size).run(BatchOptions::new(category))?;

    println!();
    println!("{}", "All batches complete:".yellow().bold());
    println!("  Processed: {}", summary.processed.to_string().green());
    if summary.failed > 0 {
        println!("  Failed:    {}", summary.failed.to_string().red());
    }
    println!("  Queue:     {}", summary.queued);

    Ok(())
}
