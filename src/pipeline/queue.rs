//! Bounded block queue between the producer and the checksum workers
//!
//! Built on a bounded crossbeam channel. The producer holds the single
//! sender; each worker holds a clone of the receiver. `send` blocks while
//! the queue is at capacity, which gives true backpressure: a slow worker
//! pool throttles the producer instead of letting blocks pile up in memory.
//!
//! End-of-stream is signaled by closing the queue (dropping the sender),
//! not by any particular block. Once the queue is closed and drained, every
//! `recv` returns `None` promptly, so workers terminate even when the
//! producer aborts mid-stream without reaching the final block.

use crate::pipeline::block::Block;
use crossbeam_channel::{bounded, Receiver, Sender};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Statistics for the block queue
#[derive(Debug, Default)]
pub struct QueueStats {
    /// Total blocks enqueued
    pub enqueued: AtomicU64,

    /// Total blocks dequeued
    pub dequeued: AtomicU64,
}

impl QueueStats {
    /// Get the number of blocks enqueued so far
    pub fn enqueued_count(&self) -> u64 {
        self.enqueued.load(Ordering::Relaxed)
    }

    /// Get the number of blocks dequeued so far
    pub fn dequeued_count(&self) -> u64 {
        self.dequeued.load(Ordering::Relaxed)
    }
}

/// Bounded FIFO queue carrying blocks from the producer to the workers
pub struct BlockQueue {
    /// Sender for the single producer; taken once via `sender()`
    sender: Option<Sender<Block>>,

    /// Receiver for the workers (clone per worker)
    receiver: Receiver<Block>,

    /// Queue statistics
    stats: Arc<QueueStats>,
}

impl BlockQueue {
    /// Create a new block queue with the specified capacity
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);

        Self {
            sender: Some(sender),
            receiver,
            stats: Arc::new(QueueStats::default()),
        }
    }

    /// Take the producer-side handle
    ///
    /// There is exactly one sender: the queue closes when it is dropped.
    /// Returns `None` if the sender was already taken.
    pub fn sender(&mut self) -> Option<BlockQueueSender> {
        self.sender.take().map(|sender| BlockQueueSender {
            sender,
            stats: Arc::clone(&self.stats),
        })
    }

    /// Get a receiver for this queue (clone for each worker)
    pub fn receiver(&self) -> BlockQueueReceiver {
        BlockQueueReceiver {
            receiver: self.receiver.clone(),
            stats: Arc::clone(&self.stats),
        }
    }

    /// Get queue statistics
    pub fn stats(&self) -> Arc<QueueStats> {
        Arc::clone(&self.stats)
    }

    /// Check if the queue is empty
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }

    /// Get current queue length
    pub fn len(&self) -> usize {
        self.receiver.len()
    }
}

/// Producer-side handle for enqueuing blocks
pub struct BlockQueueSender {
    sender: Sender<Block>,
    stats: Arc<QueueStats>,
}

impl BlockQueueSender {
    /// Enqueue a block, blocking while the queue is at capacity
    ///
    /// Returns `Err` if the queue is disconnected (all workers gone).
    pub fn send(&self, block: Block) -> Result<(), ()> {
        self.sender.send(block).map_err(|_| ())?;
        self.stats.enqueued.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    /// Close the queue
    ///
    /// Consumes the sender; once the remaining blocks are drained, every
    /// `recv` returns `None`. Dropping the sender has the same effect, so
    /// early exits (read errors, panics) close the queue implicitly.
    pub fn close(self) {
        drop(self.sender);
    }
}

/// Worker-side handle for dequeuing blocks
#[derive(Clone)]
pub struct BlockQueueReceiver {
    receiver: Receiver<Block>,
    stats: Arc<QueueStats>,
}

impl BlockQueueReceiver {
    /// Dequeue a block
    ///
    /// Blocks until a block is available; returns `None` once the queue is
    /// closed and drained.
    pub fn recv(&self) -> Option<Block> {
        match self.receiver.recv() {
            Ok(block) => {
                self.stats.dequeued.fetch_add(1, Ordering::Relaxed);
                Some(block)
            }
            Err(_) => None,
        }
    }

    /// Check if the queue is empty
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }

    /// Get current queue length
    pub fn len(&self) -> usize {
        self.receiver.len()
    }
}
