//! Verify command - audit dataset quality and write a report.

use std::path::PathBuf;

use colored::Colorize;
use milon::batch::report_path;
use milon::verify::{verify, ISSUE_CATEGORIES};
use milon::WordCollection;

pub fn run(
    file: PathBuf,
    output: Option<PathBuf>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let collection = WordCollection::load(&file)?;
    let report = verify(&collection);

    let output = output.unwrap_or_else(|| report_path(&file));
    report.save(&output)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Verification of".cyan().bold(),
        file.display().to_string().white()
    );
    println!();

    let summary = &report.summary;
    println!("{}", "Overall:".yellow().bold());
    println!("  Total words: {}", summary.total_words.to_string().white());
    println!(
        "  With issues: {}",
        summary.words_with_issues.to_string().red()
    );
    println!(
        "  Clean:       {}",
        summary.words_without_issues.to_string().green()
    );
    println!();

    println!("{}", "Issues by category:".yellow().bold());
    for category in ISSUE_CATEGORIES {
        let count = report.details[category].len();
        let rendered = if count == 0 {
            count.to_string().green()
        } else {
            count.to_string().red()
        };
        println!("  {:<32} {}", category, rendered);
    }
    println!();
    println!("Report written to {}", output.display().to_string().cyan());

    if summary.words_with_issues > 0 {
        println!(
            "Run {} to fill the gaps.",
            format!("milon process {} --type placeholders", file.display())
                .cyan()
                .bold()
        );
    }

    Ok(())
}
