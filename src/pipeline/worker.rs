//! Worker thread logic for parallel block checksumming
//!
//! Each worker runs an identical loop:
//! - Pulls a block from the queue (blocking)
//! - Computes the checksum over the full padded buffer
//! - Hands the (index, checksum) record to the shared collector
//! - Terminates when the queue is closed and drained
//!
//! Workers never coordinate with each other directly; the queue and the
//! collector mediate everything. A block, once dequeued, is owned by
//! exactly one worker and dropped right after its checksum is taken.

use crate::checksum::ChecksumFn;
use crate::error::WorkerError;
use crate::pipeline::block::ChecksumRecord;
use crate::pipeline::collector::Collector;
use crate::pipeline::queue::BlockQueueReceiver;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, trace};

/// Statistics collected by a worker
#[derive(Debug, Default)]
pub struct WorkerStats {
    /// Blocks checksummed
    pub blocks_processed: AtomicU64,

    /// Bytes checksummed (full padded buffers)
    pub bytes_processed: AtomicU64,
}

impl WorkerStats {
    fn record_block(&self, bytes: u64) {
        self.blocks_processed.fetch_add(1, Ordering::Relaxed);
        self.bytes_processed.fetch_add(bytes, Ordering::Relaxed);
    }
}

/// A worker thread that checksums blocks
pub struct Worker {
    /// Worker ID
    id: usize,

    /// Thread handle
    handle: Option<JoinHandle<()>>,

    /// Worker statistics
    stats: Arc<WorkerStats>,
}

impl Worker {
    /// Spawn a new worker thread
    pub fn spawn(
        id: usize,
        queue_rx: BlockQueueReceiver,
        collector: Arc<Collector>,
        checksum: ChecksumFn,
    ) -> Result<Self, WorkerError> {
        let stats = Arc::new(WorkerStats::default());
        let stats_clone = Arc::clone(&stats);

        let handle = thread::Builder::new()
            .name(format!("sig-worker-{}", id))
            .spawn(move || worker_loop(id, queue_rx, collector, checksum, stats_clone))
            .map_err(|e| WorkerError::InitFailed {
                id,
                reason: e.to_string(),
            })?;

        Ok(Self {
            id,
            handle: Some(handle),
            stats,
        })
    }

    /// Wait for the worker to finish and hand back its statistics
    ///
    /// The counts are only final once the thread has been joined; reading
    /// them earlier undercounts blocks still draining from the queue.
    pub fn join(mut self) -> Result<Arc<WorkerStats>, WorkerError> {
        if let Some(handle) = self.handle.take() {
            handle.join().map_err(|e| WorkerError::Panicked {
                id: self.id,
                message: panic_message(&e),
            })?;
        }
        Ok(self.stats)
    }
}

/// Main worker loop: runs until the queue is closed and drained
fn worker_loop(
    id: usize,
    queue_rx: BlockQueueReceiver,
    collector: Arc<Collector>,
    checksum: ChecksumFn,
    stats: Arc<WorkerStats>,
) {
    debug!(worker = id, "Worker starting");

    while let Some(block) = queue_rx.recv() {
        // Checksum covers the whole buffer, including any zero padding
        let value = checksum(&block.data);

        trace!(
            worker = id,
            index = block.index,
            len = block.len,
            checksum = value,
            "Block checksummed"
        );

        stats.record_block(block.data.len() as u64);
        collector.add(ChecksumRecord {
            index: block.index,
            checksum: value,
        });
        // `block` drops here; its buffer is not needed after this point
    }

    debug!(
        worker = id,
        blocks = stats.blocks_processed.load(Ordering::Relaxed),
        "Worker shutting down"
    );
}

/// Extract a printable message from a thread panic payload
fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".into()
    }
}

/// Aggregate statistics from joined workers
pub fn aggregate_stats(stats: &[Arc<WorkerStats>]) -> (u64, u64) {
    let mut blocks = 0u64;
    let mut bytes = 0u64;

    for s in stats {
        blocks += s.blocks_processed.load(Ordering::Relaxed);
        bytes += s.bytes_processed.load(Ordering::Relaxed);
    }

    (blocks, bytes)
}
