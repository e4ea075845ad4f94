//! blocksig - Parallel per-block file signature generator
//!
//! Splits an input stream into fixed-size blocks, computes a CRC32 checksum
//! for each block on a pool of worker threads, and writes the checksums to
//! an output stream ordered by block index - regardless of the order in
//! which workers finish.
//!
//! # Architecture
//!
//! ```text
//!                  ┌────────────┐
//!                  │  Producer   │  single thread, reads the input
//!                  │ (slices to  │  sequentially into indexed blocks,
//!                  │   blocks)   │  zero-pads the final short block
//!                  └──────┬─────┘
//!                         │ Block (moved, single owner)
//!                         ▼
//!                  ┌────────────┐
//!                  │ BlockQueue  │  bounded crossbeam channel:
//!                  │ (bounded,   │  producer blocks when full,
//!                  │  FIFO)      │  closes on sender drop
//!                  └──────┬─────┘
//!            ┌────────────┼────────────┐
//!            ▼            ▼            ▼
//!       ┌─────────┐  ┌─────────┐  ┌─────────┐
//!       │Worker 0 │  │Worker 1 │  │Worker N │   fixed pool, each:
//!       │  crc32  │  │  crc32  │  │  crc32  │   recv -> checksum -> add
//!       └────┬────┘  └────┬────┘  └────┬────┘
//!            └────────────┼────────────┘
//!                         ▼
//!                  ┌────────────┐
//!                  │ Collector   │  mutex-guarded record store;
//!                  │ (sort by    │  finalize sorts by index and
//!                  │  index)     │  serializes 4-byte checksums
//!                  └──────┬─────┘
//!                         ▼
//!                   signature file
//! ```
//!
//! Completion order across workers is unspecified; the only ordering
//! guarantee is at finalize time, restored explicitly by sorting.
//!
//! # Example
//!
//! ```bash
//! # Sign with the default 1 MiB block size
//! blocksig data.bin data.sig
//!
//! # Smaller blocks, fixed worker count
//! blocksig data.bin data.sig -b 65536 -w 4
//! ```

pub mod checksum;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod progress;

pub use config::{CliArgs, SigConfig, DEFAULT_BLOCK_SIZE};
pub use error::{Result, SignatureError};
pub use pipeline::{SignatureCoordinator, SignatureResult};
