//! Producer thread: slices the input stream into indexed blocks
//!
//! The producer is the only thread that touches the input stream. It
//! repeatedly allocates a zeroed block buffer, fills it from the reader,
//! and enqueues the block. Indices are a local counter owned by the
//! producer, strictly increasing from 0.
//!
//! The queue sender is owned by the producer loop and dropped on every
//! exit path (normal completion, read error, disconnected queue), so the
//! workers always observe end-of-stream.

use crate::error::ProducerError;
use crate::pipeline::block::Block;
use crate::pipeline::queue::BlockQueueSender;
use std::io::Read;
use std::thread::{self, JoinHandle};
use tracing::{debug, info, trace};

/// Summary of a completed producer run
#[derive(Debug, Clone, Copy)]
pub struct ProducerReport {
    /// Number of blocks enqueued
    pub blocks: u64,

    /// Number of input bytes read (excludes zero padding)
    pub bytes_read: u64,
}

/// The producer thread handle
pub struct Producer {
    handle: Option<JoinHandle<Result<ProducerReport, ProducerError>>>,
}

impl Producer {
    /// Spawn the producer thread
    ///
    /// Takes ownership of the reader and the queue sender; the queue is
    /// closed when the producer finishes or fails.
    pub fn spawn<R>(
        reader: R,
        block_size: usize,
        sender: BlockQueueSender,
    ) -> std::io::Result<Self>
    where
        R: Read + Send + 'static,
    {
        let handle = thread::Builder::new()
            .name("sig-producer".into())
            .spawn(move || producer_loop(reader, block_size, sender))?;

        Ok(Self {
            handle: Some(handle),
        })
    }

    /// Wait for the producer to finish
    pub fn join(mut self) -> Result<ProducerReport, ProducerError> {
        match self.handle.take() {
            Some(handle) => handle.join().map_err(|_| ProducerError::Panicked)?,
            None => Err(ProducerError::Panicked),
        }
    }
}

/// Main producer loop
fn producer_loop<R: Read>(
    mut reader: R,
    block_size: usize,
    sender: BlockQueueSender,
) -> Result<ProducerReport, ProducerError> {
    debug!(block_size, "Producer starting");

    let mut index = 0u64;
    let mut bytes_read = 0u64;

    loop {
        let mut block = Block::zeroed(index, block_size);

        let read = fill_block(&mut reader, &mut block.data).map_err(|source| {
            ProducerError::ReadFailed {
                index,
                offset: bytes_read,
                source,
            }
        })?;

        if read == 0 {
            // EOF on a block boundary (or empty input): nothing to enqueue
            break;
        }

        block.len = read;
        bytes_read += read as u64;

        // A short read means EOF; the buffer tail is already zero from
        // allocation, so the block is padded and marked as the last one.
        let last = read < block_size;
        block.last = last;

        trace!(index, len = read, last, "Block enqueued");
        sender
            .send(block)
            .map_err(|_| ProducerError::QueueClosed)?;

        index += 1;

        if last {
            break;
        }
    }

    // `sender` drops here, closing the queue for the workers
    info!(blocks = index, bytes = bytes_read, "Producer finished");

    Ok(ProducerReport {
        blocks: index,
        bytes_read,
    })
}

/// Fill the buffer from the reader, looping over short reads
///
/// Returns the number of bytes placed in the buffer; fewer than
/// `buf.len()` only at end of stream.
fn fill_block<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;

    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }

    Ok(filled)
}
