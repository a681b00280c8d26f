// In: src/config.rs

//! The single source of truth for the packed block format.
//!
//! The codec has no runtime tuning knobs: block size, the widest supported value
//! and the specialization ceiling are compile-time constants. What *can* vary is
//! which on-disk layout a file was written with, so this module also defines a
//! serializable `FormatDescriptor` that an embedding storage format writes once
//! (e.g. into a footer) and checks before handing blocks to the codec.

use serde::{Deserialize, Serialize};

use crate::error::BlockpackError;

//==================================================================================
// I. Compile-Time Constants
//==================================================================================

/// Number of values in every block.
pub const BLOCK_SIZE: usize = 128;

/// Widest value, in bits, a block may contain.
pub const MAX_BITS_PER_VALUE: u32 = 32;

/// Widths `1..=MAX_SPECIALIZED_BITS_PER_VALUE` decode through an unrolled variant;
/// wider blocks use the generic fallback.
pub const MAX_SPECIALIZED_BITS_PER_VALUE: u32 = 24;

/// The current version of the packed block format.
pub const FORMAT_VERSION: u16 = 1;

//==================================================================================
// II. Format Descriptor
//==================================================================================

/// The payload layout of a packed block.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PackedLayout {
    /// **Default:** values are transposed into 8/16/32-bit lanes chosen by the
    /// block's bit width, then streamed lane-parallel into 64-bit words. This is
    /// the only layout this crate reads or writes.
    #[default]
    LaneTransposed,

    /// The historical layout that always packs two 32-bit values per word. It is
    /// not wire compatible with `LaneTransposed` and is recognized only so that
    /// descriptors naming it are rejected with a clear error.
    InterleavedPairs,
}

/// Describes the packed block format a stream was written with.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct FormatDescriptor {
    pub version: u16,

    #[serde(default = "default_block_size")]
    pub block_size: u32,

    #[serde(default)]
    pub layout: PackedLayout,

    #[serde(default = "default_max_bits_per_value")]
    pub max_bits_per_value: u8,
}

impl FormatDescriptor {
    /// The descriptor for blocks written by this build.
    pub fn current() -> Self {
        Self {
            version: FORMAT_VERSION,
            block_size: default_block_size(),
            layout: PackedLayout::default(),
            max_bits_per_value: default_max_bits_per_value(),
        }
    }

    /// Verifies that blocks described by `self` can be decoded by this build.
    pub fn check_compatible(&self) -> Result<(), BlockpackError> {
        if self.version > FORMAT_VERSION {
            return Err(BlockpackError::IncompatibleFormat(format!(
                "format version {} is newer than supported version {}",
                self.version, FORMAT_VERSION
            )));
        }
        if self.block_size as usize != BLOCK_SIZE {
            return Err(BlockpackError::IncompatibleFormat(format!(
                "block size {} (only {} is supported)",
                self.block_size, BLOCK_SIZE
            )));
        }
        if self.layout != PackedLayout::LaneTransposed {
            return Err(BlockpackError::IncompatibleFormat(format!(
                "layout {:?} is not supported",
                self.layout
            )));
        }
        if u32::from(self.max_bits_per_value) > MAX_BITS_PER_VALUE {
            return Err(BlockpackError::IncompatibleFormat(format!(
                "max bits per value {} exceeds {}",
                self.max_bits_per_value, MAX_BITS_PER_VALUE
            )));
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, BlockpackError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses a descriptor and checks it against this build in one step.
    pub fn from_json(json: &str) -> Result<Self, BlockpackError> {
        let descriptor: FormatDescriptor = serde_json::from_str(json)?;
        descriptor.check_compatible()?;
        Ok(descriptor)
    }
}

impl Default for FormatDescriptor {
    fn default() -> Self {
        Self::current()
    }
}

/// Helper for `serde` to provide a default for `block_size`.
fn default_block_size() -> u32 {
    BLOCK_SIZE as u32
}

/// Helper for `serde` to provide a default for `max_bits_per_value`.
fn default_max_bits_per_value() -> u8 {
    MAX_BITS_PER_VALUE as u8
}
