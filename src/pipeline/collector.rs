//! Collector: gathers checksum records and serializes the signature
//!
//! Workers finish blocks in no particular order, so records land here
//! out of order. The collector accumulates them under a mutex and restores
//! index order by sorting at finalize time - output order is never assumed
//! to emerge from execution order.

use crate::pipeline::block::ChecksumRecord;
use std::io::Write;
use std::sync::{Mutex, PoisonError};
use tracing::debug;

/// Accumulates per-block checksum records and writes the final signature
pub struct Collector {
    /// Records in worker-completion order
    records: Mutex<Vec<ChecksumRecord>>,
}

impl Collector {
    /// Create an empty collector
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }

    /// Add a checksum record; safe to call concurrently from multiple workers
    pub fn add(&self, record: ChecksumRecord) {
        // A poisoned lock means a worker panicked mid-push; the coordinator
        // surfaces that panic separately, the record store stays usable.
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record);
    }

    /// Number of records accumulated so far
    pub fn len(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Check if no records have been accumulated
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Serialize the signature: sort by block index, write each checksum as
    /// 4 native-endian bytes, flush, and return the number of records written
    ///
    /// Must be called exactly once, after all workers have terminated; the
    /// coordinator's join-then-finalize control flow guarantees no `add`
    /// races with this.
    pub fn finalize<W: Write>(&self, writer: &mut W) -> std::io::Result<u64> {
        let mut records = std::mem::take(
            &mut *self
                .records
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        );

        records.sort_unstable_by_key(|r| r.index);

        for record in &records {
            writer.write_all(&record.checksum.to_ne_bytes())?;
        }
        writer.flush()?;

        debug!(records = records.len(), "Signature serialized");
        Ok(records.len() as u64)
    }
}

impl Default for Collector {
    fn default() -> Self {
        Self::new()
    }
}
