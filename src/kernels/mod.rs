//! This module collects the pure, stateless kernels that make up the block codec.
//!
//! Each kernel is one stage of the FOR (frame-of-reference) pipeline and owns no
//! state between calls. The only shared data are the `const` mask tables in
//! [`masks`], which are baked into the binary and therefore safe to read from any
//! number of threads without synchronization.
//!
//! Data flow for a single block:
//!
//!   encode: values -> [`bit_width`] -> [`transpose`] collapse -> [`stream`] pack
//!   decode: [`specialized`] unpack (or generic fallback) -> [`transpose`] expand

use crate::config::BLOCK_SIZE;

//==================================================================================
// 1. Module Declarations
//==================================================================================

/// Stage 1: Bit-Width Analysis
pub mod bit_width;

/// Stage 2: Lane Transposition
pub mod transpose;

/// Stage 3: Bit Streaming (generic engine and the unrolled decoders)
pub mod masks;
pub mod specialized;
pub mod stream;

//==================================================================================
// 2. Shared Types
//==================================================================================

/// A block of exactly [`BLOCK_SIZE`] unsigned values, each at most 32 bits wide.
pub type Block = [u32; BLOCK_SIZE];

/// The largest number of 64-bit cells a block can occupy after transposition
/// (bucket 32: two values per cell).
pub const MAX_LANES: usize = BLOCK_SIZE / 2;

/// The largest number of 64-bit words a packed payload can occupy (32 bits per value).
pub const MAX_PACKED_WORDS: usize = BLOCK_SIZE * 32 / 64;

/// Working storage for the transposed block. Only the first `Bucket::lanes()`
/// cells are meaningful for a given bucket.
pub type LaneArray = [u64; MAX_LANES];

pub use bit_width::{BitWidth, Bucket};
