//! This module contains the bit-width analysis kernel and the two small value
//! types that describe a packed block: [`BitWidth`] and [`Bucket`].
//!
//! The width of a block is the bit length of the OR of all its values, which is
//! the same as the bit length of its maximum. It is computed branch-free in a
//! single pass.

use std::fmt;

use crate::config::MAX_BITS_PER_VALUE;
use crate::error::BlockpackError;
use crate::kernels::Block;

//==================================================================================
// 1. Bucket (primitive lane granularity)
//==================================================================================

/// The lane granularity a block is transposed into before streaming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    /// Eight 8-bit sub-lanes per cell, 16 cells per block.
    B8,
    /// Four 16-bit sub-lanes per cell, 32 cells per block.
    B16,
    /// Two 32-bit sub-lanes per cell, 64 cells per block.
    B32,
}

impl Bucket {
    /// Selects the smallest bucket that holds `bits`-wide values.
    #[inline]
    pub const fn for_bits(bits: u32) -> Self {
        if bits <= 8 {
            Bucket::B8
        } else if bits <= 16 {
            Bucket::B16
        } else {
            Bucket::B32
        }
    }

    /// Width of one sub-lane in bits.
    #[inline]
    pub const fn bits(self) -> u32 {
        match self {
            Bucket::B8 => 8,
            Bucket::B16 => 16,
            Bucket::B32 => 32,
        }
    }

    /// Number of 64-bit cells a block occupies in this bucket's layout.
    #[inline]
    pub const fn lanes(self) -> usize {
        (crate::config::BLOCK_SIZE * self.bits() as usize) / 64
    }
}

//==================================================================================
// 2. BitWidth
//==================================================================================

/// The number of bits used per value in a packed block, always in `0..=32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct BitWidth(u8);

impl BitWidth {
    pub const ZERO: BitWidth = BitWidth(0);
    pub const MAX: BitWidth = BitWidth(MAX_BITS_PER_VALUE as u8);

    /// Validates a raw width, e.g. one read from a block header.
    pub fn new(bits: u8) -> Result<Self, BlockpackError> {
        if u32::from(bits) > MAX_BITS_PER_VALUE {
            return Err(BlockpackError::InvalidBitWidth(bits));
        }
        Ok(BitWidth(bits))
    }

    /// The minimal width that represents every value of `block`.
    #[inline]
    pub fn of(block: &Block) -> Self {
        BitWidth(bits_required(block) as u8)
    }

    #[inline]
    pub const fn get(self) -> u32 {
        self.0 as u32
    }

    /// The raw header byte for this width.
    #[inline]
    pub const fn as_byte(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn bucket(self) -> Bucket {
        Bucket::for_bits(self.0 as u32)
    }

    /// Number of 64-bit words in the packed payload: `ceil(128 * bits / 64)`.
    #[inline]
    pub const fn packed_words(self) -> usize {
        (crate::config::BLOCK_SIZE * self.0 as usize).div_ceil(64)
    }

    /// Number of payload bytes following the header byte.
    #[inline]
    pub const fn packed_bytes(self) -> usize {
        self.packed_words() * 8
    }

    /// Largest value representable at this width.
    #[inline]
    pub const fn max_value(self) -> u32 {
        if self.0 == 0 {
            0
        } else {
            u32::MAX >> (32 - self.0 as u32)
        }
    }
}

impl TryFrom<u8> for BitWidth {
    type Error = BlockpackError;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        BitWidth::new(bits)
    }
}

impl fmt::Display for BitWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bits", self.0)
    }
}

//==================================================================================
// 3. Kernel
//==================================================================================

/// Returns the minimal number of bits needed to represent every value of the block.
///
/// OR-reduces the block and takes the bit length of the accumulator, so an
/// all-zero block yields 0.
#[inline]
pub fn bits_required(block: &Block) -> u32 {
    let or = block.iter().fold(0u32, |acc, &v| acc | v);
    u32::BITS - or.leading_zeros()
}

//==================================================================================
// 4. Unit Tests
//==================================================================================
