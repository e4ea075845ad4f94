//! Configuration types for blocksig
//!
//! This module defines:
//! - CLI argument parsing using clap derive macros
//! - Runtime configuration with validation

use crate::error::ConfigError;
use clap::Parser;
use std::path::PathBuf;

/// Default block size: 1 MiB
pub const DEFAULT_BLOCK_SIZE: usize = 1024 * 1024;

/// Minimum block size
const MIN_BLOCK_SIZE: usize = 1;

/// Maximum reasonable worker count
const MAX_WORKERS: usize = 512;

/// Minimum queue capacity
const MIN_QUEUE_CAPACITY: usize = 1;

/// Parallel per-block CRC32 file signature generator
#[derive(Parser, Debug, Clone)]
#[command(
    name = "blocksig",
    version,
    about = "Parallel per-block CRC32 file signature generator",
    long_about = "Splits the input file into fixed-size blocks, computes a CRC32 checksum \
                  for each block on a pool of worker threads, and writes the checksums to \
                  the output file ordered by block index.\n\n\
                  The final short block is zero-padded to the full block size before \
                  checksumming. The output is N consecutive 4-byte values, where \
                  N = ceil(input_size / block_size).",
    after_help = "EXAMPLES:\n    \
        blocksig data.bin data.sig\n    \
        blocksig data.bin data.sig -b 65536\n    \
        blocksig data.bin data.sig -w 8 --queue-size 32"
)]
pub struct CliArgs {
    /// Input file to sign
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Output signature file
    #[arg(value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Block size in bytes
    #[arg(
        short = 'b',
        long,
        default_value_t = DEFAULT_BLOCK_SIZE,
        value_name = "BYTES"
    )]
    pub block_size: usize,

    /// Number of checksum worker threads
    #[arg(
        short = 'w',
        long,
        default_value_t = default_workers(),
        value_name = "NUM"
    )]
    pub workers: usize,

    /// Block queue capacity (controls memory usage; the producer blocks when full)
    #[arg(long, default_value = "16", value_name = "NUM")]
    pub queue_size: usize,

    /// Quiet mode - suppress progress output
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Verbose output (debug logging)
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

fn default_workers() -> usize {
    // Checksumming is CPU bound, one worker per core
    num_cpus::get()
}

/// Validated runtime configuration
#[derive(Debug, Clone)]
pub struct SigConfig {
    /// Input file path
    pub input_path: PathBuf,

    /// Output signature path
    pub output_path: PathBuf,

    /// Block size in bytes
    pub block_size: usize,

    /// Number of worker threads
    pub worker_count: usize,

    /// Block queue capacity
    pub queue_capacity: usize,

    /// Show progress indicator
    pub show_progress: bool,

    /// Verbose logging
    pub verbose: bool,
}

impl SigConfig {
    /// Create and validate configuration from CLI arguments
    ///
    /// Both positional paths must be present; the caller handles the
    /// missing-argument case (print usage, exit cleanly) before calling this.
    pub fn from_args(args: CliArgs) -> Result<Self, ConfigError> {
        let input_path = args.input.ok_or_else(|| ConfigError::InvalidInputPath {
            path: PathBuf::new(),
            reason: "Input file is required".into(),
        })?;

        let output_path = args.output.ok_or_else(|| ConfigError::InvalidOutputPath {
            path: PathBuf::new(),
            reason: "Output file is required".into(),
        })?;

        // Validate block size
        if args.block_size < MIN_BLOCK_SIZE {
            return Err(ConfigError::InvalidBlockSize {
                size: args.block_size,
                min: MIN_BLOCK_SIZE,
            });
        }

        // Validate worker count
        if args.workers == 0 || args.workers > MAX_WORKERS {
            return Err(ConfigError::InvalidWorkerCount {
                count: args.workers,
                max: MAX_WORKERS,
            });
        }

        // Validate queue capacity
        if args.queue_size < MIN_QUEUE_CAPACITY {
            return Err(ConfigError::InvalidQueueCapacity {
                size: args.queue_size,
                min: MIN_QUEUE_CAPACITY,
            });
        }

        // Validate output path parent
        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                return Err(ConfigError::InvalidOutputPath {
                    path: output_path.clone(),
                    reason: format!("Parent directory '{}' does not exist", parent.display()),
                });
            }
        }

        Ok(Self {
            input_path,
            output_path,
            block_size: args.block_size,
            worker_count: args.workers,
            queue_capacity: args.queue_size,
            show_progress: !args.quiet,
            verbose: args.verbose,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> CliArgs {
        CliArgs {
            input: Some(PathBuf::from("in.bin")),
            output: Some(PathBuf::from("out.sig")),
            block_size: DEFAULT_BLOCK_SIZE,
            workers: 4,
            queue_size: 16,
            quiet: false,
            verbose: false,
        }
    }

    #[test]
    fn test_valid_config() {
        let config = SigConfig::from_args(base_args()).unwrap();
        assert_eq!(config.block_size, DEFAULT_BLOCK_SIZE);
        assert_eq!(config.worker_count, 4);
        assert_eq!(config.queue_capacity, 16);
        assert!(config.show_progress);
    }

    #[test]
    fn test_zero_block_size_rejected() {
        let mut args = base_args();
        args.block_size = 0;
        let err = SigConfig::from_args(args).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBlockSize { .. }));
    }

    #[test]
    fn test_zero_workers_rejected() {
        let mut args = base_args();
        args.workers = 0;
        let err = SigConfig::from_args(args).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidWorkerCount { .. }));
    }

    #[test]
    fn test_excessive_workers_rejected() {
        let mut args = base_args();
        args.workers = 10_000;
        let err = SigConfig::from_args(args).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidWorkerCount { .. }));
    }

    #[test]
    fn test_zero_queue_capacity_rejected() {
        let mut args = base_args();
        args.queue_size = 0;
        let err = SigConfig::from_args(args).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidQueueCapacity { .. }));
    }

    #[test]
    fn test_missing_input_rejected() {
        let mut args = base_args();
        args.input = None;
        let err = SigConfig::from_args(args).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidInputPath { .. }));
    }

    #[test]
    fn test_quiet_disables_progress() {
        let mut args = base_args();
        args.quiet = true;
        let config = SigConfig::from_args(args).unwrap();
        assert!(!config.show_progress);
    }
}
