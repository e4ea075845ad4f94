//! Signature coordinator - orchestrates the parallel block pipeline
//!
//! The coordinator is responsible for:
//! - Setting up the block queue, collector, and workers
//! - Spawning the producer and worker threads
//! - Joining everything before finalizing (no `add` can race the serialize)
//! - Surfacing producer and worker failures to the caller
//!
//! Control flow: producer -> queue -> N workers -> collector -> writer.
//! The collector is finalized only after the producer and every worker
//! have been joined.

use crate::checksum::ChecksumFn;
use crate::config::SigConfig;
use crate::error::{Result, SignatureError};
use crate::pipeline::collector::Collector;
use crate::pipeline::producer::Producer;
use crate::pipeline::queue::BlockQueue;
use crate::pipeline::worker::{aggregate_stats, Worker};
use std::io::{Read, Write};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Result of a completed signature run
#[derive(Debug)]
pub struct SignatureResult {
    /// Blocks read from the input
    pub blocks: u64,

    /// Input bytes read (excludes zero padding)
    pub bytes_read: u64,

    /// Checksum records written to the output
    pub records_written: u64,

    /// Time taken for the run
    pub duration: Duration,
}

/// Coordinates the parallel signature pipeline
pub struct SignatureCoordinator {
    /// Configuration
    config: SigConfig,
}

impl SignatureCoordinator {
    /// Create a new coordinator
    pub fn new(config: SigConfig) -> Self {
        Self { config }
    }

    /// Run the pipeline over an opened input/output stream pair
    ///
    /// The streams are opened by the caller; the pipeline only reads from
    /// one and writes to the other. The checksum function is injected so
    /// the core stays independent of the concrete algorithm.
    pub fn run<R, W>(
        &self,
        reader: R,
        writer: &mut W,
        checksum: ChecksumFn,
    ) -> Result<SignatureResult>
    where
        R: Read + Send + 'static,
        W: Write,
    {
        let start_time = Instant::now();

        info!(
            block_size = self.config.block_size,
            workers = self.config.worker_count,
            queue_capacity = self.config.queue_capacity,
            "Starting signature pipeline"
        );

        let mut queue = BlockQueue::new(self.config.queue_capacity);
        let collector = Arc::new(Collector::new());

        // The producer owns the single sender; the queue closes when the
        // producer finishes or fails, which is what terminates the workers.
        let sender = queue
            .sender()
            .ok_or(SignatureError::ChannelClosed)?;

        let workers = self.spawn_workers(&queue, &collector, checksum)?;

        // The workers now hold the only receivers. Dropping the queue's own
        // handle lets the sender observe disconnection if the whole pool
        // dies, instead of blocking forever at capacity.
        drop(queue);

        let producer = Producer::spawn(reader, self.config.block_size, sender)?;

        // Join the producer first; its error (if any) takes priority, but
        // the workers are joined either way so the collector is quiescent.
        let producer_result = producer.join();

        let (worker_blocks, _worker_bytes) = self.join_workers(workers)?;
        let report = producer_result?;

        if worker_blocks != report.blocks {
            warn!(
                produced = report.blocks,
                processed = worker_blocks,
                "Block count mismatch between producer and workers"
            );
        }

        // All threads are joined: the collector is exclusively ours now
        let records_written = collector.finalize(writer)?;
        let duration = start_time.elapsed();

        info!(
            blocks = report.blocks,
            bytes = report.bytes_read,
            records = records_written,
            duration_ms = duration.as_millis() as u64,
            "Signature pipeline completed"
        );

        Ok(SignatureResult {
            blocks: report.blocks,
            bytes_read: report.bytes_read,
            records_written,
            duration,
        })
    }

    /// Spawn the worker pool
    fn spawn_workers(
        &self,
        queue: &BlockQueue,
        collector: &Arc<Collector>,
        checksum: ChecksumFn,
    ) -> Result<Vec<Worker>> {
        let mut workers = Vec::with_capacity(self.config.worker_count);

        for id in 0..self.config.worker_count {
            let worker = Worker::spawn(id, queue.receiver(), Arc::clone(collector), checksum)?;
            workers.push(worker);
        }

        info!(count = workers.len(), "Workers spawned");
        Ok(workers)
    }

    /// Join all worker threads, then collect final stats
    ///
    /// Stats are aggregated only after every thread has been joined; a
    /// worker still draining the queue would otherwise be undercounted.
    fn join_workers(&self, workers: Vec<Worker>) -> Result<(u64, u64)> {
        let mut stats = Vec::with_capacity(workers.len());
        for worker in workers {
            stats.push(worker.join()?);
        }

        Ok(aggregate_stats(&stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checksum::crc32;
    use std::io::Cursor;
    use std::path::PathBuf;

    fn test_config(block_size: usize, workers: usize) -> SigConfig {
        SigConfig {
            input_path: PathBuf::from("unused"),
            output_path: PathBuf::from("unused"),
            block_size,
            worker_count: workers,
            queue_capacity: 4,
            show_progress: false,
            verbose: false,
        }
    }

    fn run_pipeline(input: Vec<u8>, block_size: usize, workers: usize) -> (Vec<u8>, SignatureResult) {
        let coordinator = SignatureCoordinator::new(test_config(block_size, workers));
        let mut out = Vec::new();
        let result = coordinator
            .run(Cursor::new(input), &mut out, crc32)
            .unwrap();
        (out, result)
    }

    #[test]
    fn test_signature_length_matches_block_count() {
        // 100 bytes in 16-byte blocks: ceil(100/16) = 7
        let (out, result) = run_pipeline(vec![0x42; 100], 16, 2);
        assert_eq!(result.blocks, 7);
        assert_eq!(result.records_written, 7);
        assert_eq!(result.bytes_read, 100);
        assert_eq!(out.len(), 28);
    }

    #[test]
    fn test_empty_input_empty_signature() {
        let (out, result) = run_pipeline(Vec::new(), 16, 2);
        assert_eq!(result.blocks, 0);
        assert_eq!(result.records_written, 0);
        assert!(out.is_empty());
    }

    #[test]
    fn test_output_order_matches_block_index() {
        let mut input = Vec::new();
        for i in 0..20u8 {
            input.extend(std::iter::repeat(i).take(16));
        }

        let (out, _) = run_pipeline(input, 16, 8);

        for i in 0..20u8 {
            let expected = crc32(&[i; 16]);
            let offset = i as usize * 4;
            let got = u32::from_ne_bytes(out[offset..offset + 4].try_into().unwrap());
            assert_eq!(got, expected, "block {} out of order", i);
        }
    }

    #[test]
    fn test_deterministic_across_worker_counts() {
        let input: Vec<u8> = (0..10_000u32).map(|i| (i % 251) as u8).collect();

        let (out1, _) = run_pipeline(input.clone(), 333, 1);
        let (out2, _) = run_pipeline(input.clone(), 333, 2);
        let (out8, _) = run_pipeline(input, 333, 8);

        assert_eq!(out1, out2);
        assert_eq!(out1, out8);
    }

    #[test]
    fn test_padded_final_block_checksum() {
        // 40 bytes in 16-byte blocks: last block is 8 bytes + 8 zeros
        let input = vec![0x7Fu8; 40];
        let (out, result) = run_pipeline(input, 16, 2);

        assert_eq!(result.blocks, 3);

        let mut padded = vec![0x7Fu8; 8];
        padded.resize(16, 0);
        let expected = crc32(&padded);

        let got = u32::from_ne_bytes(out[8..12].try_into().unwrap());
        assert_eq!(got, expected);
    }

    /// Checksum that is much slower than the producer, so blocks are still
    /// queued when the producer finishes sending
    fn slow_crc32(data: &[u8]) -> u32 {
        std::thread::sleep(std::time::Duration::from_millis(10));
        crc32(data)
    }

    #[test]
    fn test_slow_workers_still_account_for_every_block() {
        let coordinator = SignatureCoordinator::new(test_config(16, 4));
        let input = vec![0x11u8; 16 * 12];
        let mut out = Vec::new();

        let result = coordinator
            .run(Cursor::new(input), &mut out, slow_crc32)
            .unwrap();

        // Joining precedes the stats read, so lagging workers are fully
        // counted and every block reaches the signature.
        assert_eq!(result.blocks, 12);
        assert_eq!(result.records_written, 12);
        assert_eq!(out.len(), 12 * 4);
    }

    fn panicking_checksum(_data: &[u8]) -> u32 {
        panic!("checksum worker down")
    }

    #[test]
    fn test_dead_worker_pool_fails_run_instead_of_blocking() {
        let coordinator = SignatureCoordinator::new(test_config(8, 2));
        // Far more blocks than queue capacity plus pool size: with every
        // worker dead, the producer can only finish if it observes the
        // queue disconnect instead of blocking at capacity.
        let input = vec![0x22u8; 8 * 64];
        let mut out = Vec::new();

        let err = coordinator
            .run(Cursor::new(input), &mut out, panicking_checksum)
            .unwrap_err();
        assert!(matches!(err, SignatureError::Worker(_)));
        assert!(out.is_empty());
    }

    #[test]
    fn test_producer_read_error_fails_run_without_stall() {
        struct FailingReader;
        impl Read for FailingReader {
            fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("io failure"))
            }
        }

        let coordinator = SignatureCoordinator::new(test_config(16, 4));
        let mut out = Vec::new();

        // The run returns (workers terminate via queue close) with the
        // producer's error, rather than hanging on a missing last block.
        let err = coordinator.run(FailingReader, &mut out, crc32).unwrap_err();
        assert!(matches!(err, SignatureError::Producer(_)));
    }
}
