//! Block and checksum record types
//!
//! A `Block` is the unit of work flowing from the producer to the workers.
//! It is moved through the queue, so exactly one thread owns it at any
//! instant; the buffer is dropped as soon as its checksum is computed.

/// A fixed-size, indexed chunk of the input stream
#[derive(Debug)]
pub struct Block {
    /// Block index, assigned by the producer in strictly increasing order from 0
    pub index: u64,

    /// Number of input bytes actually read into this block (<= block size)
    pub len: usize,

    /// Block payload; always exactly block_size bytes, zero-padded past `len`
    pub data: Vec<u8>,

    /// Marks the final, short block of the stream
    ///
    /// This is data, not a termination signal: end-of-stream is signaled by
    /// closing the queue, so a producer that aborts mid-read never strands
    /// the workers.
    pub last: bool,
}

impl Block {
    /// Create a block with a freshly zeroed buffer of `block_size` bytes
    pub fn zeroed(index: u64, block_size: usize) -> Self {
        Self {
            index,
            len: 0,
            data: vec![0u8; block_size],
            last: false,
        }
    }

    /// Whether this block was completely filled from the input
    pub fn is_full(&self) -> bool {
        self.len == self.data.len()
    }
}

/// Checksum of a single block, tagged with its original index
///
/// Produced exactly once per block, by exactly one worker. The collector
/// sorts these by index at finalize time to restore input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecksumRecord {
    /// Index of the source block
    pub index: u64,

    /// CRC32 of the block's full padded buffer
    pub checksum: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeroed_block() {
        let block = Block::zeroed(7, 64);
        assert_eq!(block.index, 7);
        assert_eq!(block.len, 0);
        assert_eq!(block.data.len(), 64);
        assert!(block.data.iter().all(|&b| b == 0));
        assert!(!block.last);
        assert!(!block.is_full());
    }

    #[test]
    fn test_is_full() {
        let mut block = Block::zeroed(0, 8);
        block.len = 8;
        assert!(block.is_full());
        block.len = 5;
        assert!(!block.is_full());
    }
}
