//! Block checksum calculation using crc32fast
//!
//! CRC32 (IEEE) is the integrity checksum used for signature blocks. It is
//! fast, deterministic, and fixed-width (32 bits), which keeps the output
//! format at exactly 4 bytes per block.
//!
//! The pipeline takes the checksum as an injected function, so alternative
//! 32-bit checksums can be wired in without touching the core.

/// Function type for a per-block checksum: pure, stateless, deterministic.
pub type ChecksumFn = fn(&[u8]) -> u32;

/// Compute the CRC32 (IEEE) checksum of a block's bytes
///
/// The caller passes the full padded block buffer; zero padding on the
/// final block is included in the checksum by design.
pub fn crc32(data: &[u8]) -> u32 {
    crc32fast::hash(data)
}
