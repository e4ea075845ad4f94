//! blocksig - Parallel per-block file signature generator
//!
//! Entry point for the CLI application.

use anyhow::{Context, Result};
use blocksig::checksum;
use blocksig::config::{CliArgs, SigConfig};
use blocksig::progress::{print_header, print_summary, ProgressReporter};
use blocksig::SignatureCoordinator;
use clap::{CommandFactory, Parser};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    // Parse CLI arguments
    let args = CliArgs::parse();

    // Setup logging
    setup_logging(args.verbose)?;

    // Missing positional arguments: print usage and exit cleanly without
    // touching any files.
    if args.input.is_none() || args.output.is_none() {
        CliArgs::command().print_help()?;
        println!();
        return Ok(());
    }

    // Validate and create config
    let config = SigConfig::from_args(args).context("Invalid configuration")?;

    // Print header
    if config.show_progress {
        print_header(
            &config.input_path.display().to_string(),
            &config.output_path.display().to_string(),
            config.block_size,
            config.worker_count,
        );
    }

    // Open the streams; the pipeline itself never opens files
    let input = File::open(&config.input_path)
        .with_context(|| format!("Cannot open input file '{}'", config.input_path.display()))?;
    let output = File::create(&config.output_path)
        .with_context(|| format!("Cannot create output file '{}'", config.output_path.display()))?;

    let reader = BufReader::new(input);
    let mut writer = BufWriter::new(output);

    // Create progress reporter
    let progress = if config.show_progress {
        Some(ProgressReporter::new())
    } else {
        None
    };

    if let Some(ref p) = progress {
        p.set_status("Computing block checksums...");
    }

    // Run the pipeline
    let coordinator = SignatureCoordinator::new(config.clone());
    let result = coordinator
        .run(reader, &mut writer, checksum::crc32)
        .context("Signature run failed")?;

    if let Some(ref p) = progress {
        p.finish_and_clear();
    }

    // Print summary
    if config.show_progress {
        print_summary(
            result.records_written,
            result.bytes_read,
            config.block_size,
            result.duration,
            &config.output_path.display().to_string(),
        );
    }

    Ok(())
}

fn setup_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("blocksig=debug,warn")
    } else {
        EnvFilter::new("blocksig=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}
