//! Terminal output for the command-line front end.
//!
//! Colored status lines, the progress bar drawn during a pass, and the
//! per-category summary printed afterwards.

use crate::directory_pass::PassOutcome;
use crate::file_category::CATEGORIES;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

/// Manages all CLI output with consistent styling.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    ///
    /// ```no_run
    /// use destinii::output::OutputFormatter;
    /// OutputFormatter::success("Path saved successfully.");
    /// ```
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red to stderr.
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    pub fn plain(message: &str) {
        println!("{}", message);
    }

    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Creates a progress bar sized to the files waiting in the directory.
    ///
    /// The bar is drawn at `0/total` straight away, before the first move.
    pub fn create_progress_bar(total: u64) -> ProgressBar {
        let style = ProgressStyle::with_template("{spinner:.cyan} {msg:>12} [{bar:30.green}] {pos}/{len} files")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");
        let pb = ProgressBar::new(total).with_style(style).with_message("Organizing");
        pb.tick();
        pb
    }

    /// Prints how many files each category received in a pass.
    ///
    /// Files left in place by a pass that kept going are counted on their
    /// own line under the total.
    pub fn pass_summary(outcome: &PassOutcome) {
        let rows = summary_rows(outcome);
        let moved: usize = rows.iter().map(|&(_, n)| n).sum();
        let skipped = outcome.skipped_count();

        let width = CATEGORIES.iter().map(|c| c.name.len()).max().unwrap_or(0);

        Self::header("SUMMARY");
        for (name, n) in &rows {
            println!("  {:<width$}  {:>4} {}", name, n.to_string().green(), Self::files(*n));
        }
        println!("  {}", "-".repeat(width + 12));
        println!(
            "  {:<width$}  {:>4} {}",
            "Moved".bold(),
            moved.to_string().green().bold(),
            Self::files(moved)
        );
        if skipped > 0 {
            println!(
                "  {:<width$}  {:>4} {}  {}",
                "Skipped".bold(),
                skipped.to_string().yellow().bold(),
                Self::files(skipped),
                "(left in place, see log)".yellow()
            );
        }
    }

    fn files(count: usize) -> &'static str {
        if count == 1 { "file" } else { "files" }
    }
}

/// Categories that received files, in table order, with their counts.
fn summary_rows(outcome: &PassOutcome) -> Vec<(&'static str, usize)> {
    let counts = outcome.category_counts();
    CATEGORIES
        .iter()
        .filter_map(|c| counts.get(c.name).map(|&n| (c.name, n)))
        .collect()
}
