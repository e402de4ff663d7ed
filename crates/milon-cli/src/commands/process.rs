//! Process command - run one refill batch over the collection.

use std::path::PathBuf;

use colored::Colorize;
use milon::batch::{BatchOptions, BatchProcessor, Category};

pub fn run(
    file: PathBuf,
    category: String,
    start: usize,
    count: usize,
    resume: bool,
    settings: Option<PathBuf>,
    offline: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let category: Category = category.parse()?;
    let services = super::services(settings, offline)?;

    println!(
        "{} {} ({})",
        "Processing".cyan().bold(),
        file.display().to_string().white(),
        category
    );

    let processor = BatchProcessor::new(
        &file,
        services.translator()?,
        services.sentence_generator()?,
    );
    let mut options = BatchOptions::new(category);
    options.start = start;
    options.count = count;
    options.resume = resume;

    let summary = processor.run(&options)?;

    println!();
    println!("{}", "Batch complete:".yellow().bold());
    println!("  Processed: {}", summary.processed.to_string().green());
    if summary.failed > 0 {
        println!("  Failed:    {}", summary.failed.to_string().red());
    }
    println!(
        "  Progress:  {}/{}",
        summary.cumulative.to_string().white().bold(),
        summary.queued
    );

    if !summary.is_complete() {
        println!(
            "Run {} to continue.",
            format!("milon process {} --type {} --resume", file.display(), options.category)
                .cyan()
                .bold()
        );
    }

    Ok(())
}
