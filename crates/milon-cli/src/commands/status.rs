//! Status command - show checkpoint state and dataset completeness.

use std::path::PathBuf;

use colored::Colorize;
use milon::batch::{needs_processing, progress_path, ProcessingProgress};
use milon::WordCollection;

pub fn run(file: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let collection = WordCollection::load(&file)?;

    println!(
        "{} {}",
        "Status of".cyan().bold(),
        file.display().to_string().white()
    );
    println!();

    let total = collection.len();
    let pending = collection.words.iter().filter(|w| needs_processing(w)).count();
    let complete = total - pending;

    let bar_width = 30;
    let progress = if total == 0 {
        1.0
    } else {
        complete as f64 / total as f64
    };
    let filled = (progress * bar_width as f64).round() as usize;
    let bar: String = "█".repeat(filled) + &"░".repeat(bar_width - filled);

    println!(
        "Complete: {} {}/{} ({:.0}%)",
        bar.cyan(),
        complete.to_string().white().bold(),
        total,
        progress * 100.0
    );
    println!();

    let checkpoint = progress_path(&file);
    if checkpoint.exists() {
        let progress = ProcessingProgress::load(&checkpoint)?;
        println!("{}", "Last checkpoint:".yellow().bold());
        println!("  Selector:  {}", progress.dataset_selector.white());
        println!(
            "  Processed: {}/{}",
            progress.items_processed.to_string().white().bold(),
            progress.items_total
        );
        println!("  Written:   {}", progress.timestamp.to_rfc3339());
        if !progress.is_complete() {
            println!(
                "Run {} to continue.",
                format!(
                    "milon process {} --type {} --resume",
                    file.display(),
                    progress.dataset_selector
                )
                .cyan()
                .bold()
            );
        }
    } else if pending > 0 {
        println!(
            "No checkpoint. Run {} to start filling {} pending words.",
            format!("milon process {}", file.display()).cyan().bold(),
            pending
        );
    } else {
        println!("{}", "Dataset is complete.".green().bold());
    }

    Ok(())
}
