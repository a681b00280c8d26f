// In: src/bridge/codec.rs

//! The `BlockCodec`: the stream-level encode / decode / skip of one 128-value block.
//!
//! Wire layout of a block:
//!
//! ```text
//! byte        bits per value (0..=32)
//! word[0..N)  64-bit big-endian payload words, N = 2 * bits
//! ```
//!
//! The payload length is a function of the header alone, which is what lets
//! `skip` move past a block without decoding it.

use crate::error::BlockpackError;
use crate::io::{DataInput, DataOutput};
use crate::kernels::{
    specialized, stream, transpose, BitWidth, Block, LaneArray, MAX_LANES, MAX_PACKED_WORDS,
};

/// Encodes, decodes and skips packed blocks.
///
/// The codec holds no state; a single value can be shared freely across threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlockCodec;

impl BlockCodec {
    pub fn new() -> Self {
        BlockCodec
    }

    /// Packs `block` at its minimal bit width and writes header and payload to `out`.
    ///
    /// Returns the width used.
    pub fn encode<O>(&self, block: &Block, out: &mut O) -> Result<BitWidth, BlockpackError>
    where
        O: DataOutput + ?Sized,
    {
        let bits = BitWidth::of(block);
        self.write_packed(block, bits, out)?;
        Ok(bits)
    }

    /// Packs `block` at a caller-chosen width, which may be wider than minimal.
    pub fn encode_with_bits<O>(
        &self,
        block: &Block,
        bits: BitWidth,
        out: &mut O,
    ) -> Result<(), BlockpackError>
    where
        O: DataOutput + ?Sized,
    {
        let required = BitWidth::of(block);
        if bits < required {
            return Err(BlockpackError::BitWidthTooSmall {
                requested: bits.get(),
                required: required.get(),
            });
        }
        self.write_packed(block, bits, out)
    }

    fn write_packed<O>(&self, block: &Block, bits: BitWidth, out: &mut O) -> Result<(), BlockpackError>
    where
        O: DataOutput + ?Sized,
    {
        let bucket = bits.bucket();
        let mut lanes: LaneArray = [0; MAX_LANES];
        transpose::collapse(bucket, block, &mut lanes);

        let mut words = [0u64; MAX_PACKED_WORDS];
        let written = stream::pack(&lanes, bits.get(), bucket, &mut words);
        debug_assert_eq!(written, bits.packed_words());

        log_metric!("event" = "encode_block", "bits" = bits.get(), "bucket" = bucket.bits());

        out.write_byte(bits.as_byte())?;
        out.write_fixed_words(&words[..written])?;
        Ok(())
    }

    /// Reads one block into a freshly allocated array.
    pub fn decode<I>(&self, input: &mut I) -> Result<Block, BlockpackError>
    where
        I: DataInput + ?Sized,
    {
        let mut block = [0u32; crate::config::BLOCK_SIZE];
        self.decode_into(input, &mut block)?;
        Ok(block)
    }

    /// Reads one block into `block`, overwriting all of it. Returns the block's width.
    ///
    /// On error the contents of `block` are unspecified.
    pub fn decode_into<I>(&self, input: &mut I, block: &mut Block) -> Result<BitWidth, BlockpackError>
    where
        I: DataInput + ?Sized,
    {
        let bits = read_header(input)?;
        let payload_len = bits.packed_words();

        let mut words = [0u64; MAX_PACKED_WORDS];
        input.read_fixed_words(&mut words[..payload_len])?;

        let mut lanes: LaneArray = [0; MAX_LANES];
        specialized::unpack(bits.get(), &words[..payload_len], &mut lanes);
        transpose::expand(bits.bucket(), &lanes, block);

        log_metric!(
            "event" = "decode_block",
            "bits" = bits.get(),
            "specialized" = specialized::is_specialized(bits.get())
        );
        Ok(bits)
    }

    /// Moves past one block without reading its payload. Returns the skipped block's width.
    pub fn skip<I>(&self, input: &mut I) -> Result<BitWidth, BlockpackError>
    where
        I: DataInput + ?Sized,
    {
        let bits = read_header(input)?;
        input.skip_bytes(bits.packed_bytes())?;
        Ok(bits)
    }
}

fn read_header<I>(input: &mut I) -> Result<BitWidth, BlockpackError>
where
    I: DataInput + ?Sized,
{
    let raw = input.read_byte()?;
    BitWidth::new(raw).inspect_err(|_| {
        log::warn!("rejecting block header with bit width {}", raw);
    })
}
