//! Progress reporting for the signature run
//!
//! Provides a spinner during the run (indicatif) and a styled summary once
//! the signature is written.

use console::style;
use humansize::{format_size, BINARY};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner shown while the pipeline runs
pub struct ProgressReporter {
    /// Progress bar
    bar: ProgressBar,
}

impl ProgressReporter {
    /// Create a new progress reporter
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();

        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .expect("Invalid progress template")
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );

        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }

    /// Set a status message
    pub fn set_status(&self, status: &str) {
        self.bar.set_message(status.to_string());
    }

    /// Finish and clear the progress display
    pub fn finish_and_clear(&self) {
        self.bar.finish_and_clear();
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a number with thousands separators
fn format_number(n: u64) -> String {
    let s = n.to_string();
    let bytes: Vec<_> = s.bytes().rev().collect();

    let chunks: Vec<String> = bytes
        .chunks(3)
        .map(|chunk| chunk.iter().rev().map(|&b| b as char).collect::<String>())
        .collect();

    chunks.into_iter().rev().collect::<Vec<_>>().join(",")
}

/// Print a header at the start of the run
pub fn print_header(input: &str, output: &str, block_size: usize, workers: usize) {
    println!();
    println!(
        "{} {}",
        style("blocksig").cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("{}", style("─".repeat(50)).dim());
    println!("  {} {}", style("Input:").bold(), input);
    println!("  {} {}", style("Output:").bold(), output);
    println!(
        "  {} {} ({})",
        style("Block size:").bold(),
        format_number(block_size as u64),
        format_size(block_size as u64, BINARY)
    );
    println!("  {} {}", style("Workers:").bold(), workers);
    println!();
}

/// Print a summary of the signature run
pub fn print_summary(
    blocks: u64,
    bytes_read: u64,
    block_size: usize,
    duration: Duration,
    output: &str,
) {
    let duration_secs = duration.as_secs_f64();
    let rate = if duration_secs > 0.0 {
        bytes_read as f64 / duration_secs
    } else {
        0.0
    };

    println!();
    println!("{}", style("Signature Complete").green().bold());
    println!("{}", style("─".repeat(50)).dim());
    println!("  {} {}", style("Blocks:").bold(), format_number(blocks));
    println!(
        "  {} {}",
        style("Input size:").bold(),
        format_size(bytes_read, BINARY)
    );
    println!(
        "  {} {}",
        style("Block size:").bold(),
        format_size(block_size as u64, BINARY)
    );
    println!(
        "  {} {:.2}s ({}/s)",
        style("Duration:").bold(),
        duration_secs,
        format_size(rate as u64, BINARY)
    );
    println!("  {} {}", style("Signature:").bold(), output);
    println!();
}
