//! Error types for blocksig
//!
//! This module defines the error hierarchy for the signature pipeline:
//! - Configuration and CLI errors
//! - Producer (input slicing) errors
//! - Worker thread errors
//!
//! Design philosophy:
//! - Use thiserror for structured error types in library code
//! - Errors should be actionable - include context about what to do
//! - Preserve error chains for debugging

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for the blocksig application
#[derive(Error, Debug)]
pub enum SignatureError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Producer errors
    #[error("Producer error: {0}")]
    Producer(#[from] ProducerError),

    /// Worker/concurrency errors
    #[error("Worker error: {0}")]
    Worker(#[from] WorkerError),

    /// I/O errors (file operations, signature serialization)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Channel closed unexpectedly
    #[error("Channel closed unexpectedly")]
    ChannelClosed,
}

/// Configuration and CLI errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Invalid block size
    #[error("Invalid block size {size}: must be at least {min} bytes")]
    InvalidBlockSize { size: usize, min: usize },

    /// Invalid worker count
    #[error("Invalid worker count {count}: must be between 1 and {max}")]
    InvalidWorkerCount { count: usize, max: usize },

    /// Invalid queue capacity
    #[error("Invalid queue capacity {size}: must be at least {min}")]
    InvalidQueueCapacity { size: usize, min: usize },

    /// Input path error
    #[error("Invalid input path '{path}': {reason}")]
    InvalidInputPath { path: PathBuf, reason: String },

    /// Output path error
    #[error("Invalid output path '{path}': {reason}")]
    InvalidOutputPath { path: PathBuf, reason: String },
}

/// Producer errors
#[derive(Error, Debug)]
pub enum ProducerError {
    /// Read from the input stream failed mid-run
    #[error("Failed to read block {index} (offset {offset}): {source}")]
    ReadFailed {
        index: u64,
        offset: u64,
        source: std::io::Error,
    },

    /// Block queue closed before the producer finished
    #[error("Block queue closed before end of input")]
    QueueClosed,

    /// Producer thread panicked
    #[error("Producer thread panicked")]
    Panicked,
}

/// Worker thread errors
#[derive(Error, Debug)]
pub enum WorkerError {
    /// Worker panicked
    #[error("Worker {id} panicked: {message}")]
    Panicked { id: usize, message: String },

    /// Worker initialization failed
    #[error("Failed to initialize worker {id}: {reason}")]
    InitFailed { id: usize, reason: String },
}

/// Result type alias for SignatureError
pub type Result<T> = std::result::Result<T, SignatureError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion() {
        let cfg_err = ConfigError::InvalidWorkerCount { count: 0, max: 512 };
        let sig_err: SignatureError = cfg_err.into();
        assert!(matches!(sig_err, SignatureError::Config(_)));

        let io_err = std::io::Error::other("boom");
        let sig_err: SignatureError = io_err.into();
        assert!(matches!(sig_err, SignatureError::Io(_)));
    }

    #[test]
    fn test_producer_error_display() {
        let err = ProducerError::ReadFailed {
            index: 3,
            offset: 3_145_728,
            source: std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "truncated"),
        };
        let msg = err.to_string();
        assert!(msg.contains("block 3"));
        assert!(msg.contains("3145728"));
    }
}
