// In: src/bridge/stateless_api.rs

//! Byte-buffer convenience wrappers around `BlockCodec`, plus the conversion
//! from arbitrary unsigned integer slices into a `Block`.

use num_traits::{PrimInt, Unsigned};

use crate::bridge::codec::BlockCodec;
use crate::config::BLOCK_SIZE;
use crate::error::BlockpackError;
use crate::io::ByteArrayInput;
use crate::kernels::Block;

/// Encodes one block into a new byte vector.
pub fn encode_block(block: &Block) -> Result<Vec<u8>, BlockpackError> {
    let mut out = Vec::with_capacity(crate::bridge::format::MAX_ENCODED_LEN);
    BlockCodec.encode(block, &mut out)?;
    Ok(out)
}

/// Decodes the block at the start of `bytes`.
///
/// Trailing bytes after the block are ignored, so this also works on a buffer
/// holding a run of blocks.
pub fn decode_block(bytes: &[u8]) -> Result<Block, BlockpackError> {
    BlockCodec.decode(&mut ByteArrayInput::new(bytes))
}

/// Returns the number of bytes occupied by the block at the start of `bytes`,
/// verifying the whole block is present.
pub fn skip_block(bytes: &[u8]) -> Result<usize, BlockpackError> {
    let mut input = ByteArrayInput::new(bytes);
    BlockCodec.skip(&mut input)?;
    Ok(input.position())
}

/// Builds a `Block` from exactly `BLOCK_SIZE` unsigned values of any width,
/// checking that each one fits in 32 bits.
pub fn block_from_values<T>(values: &[T]) -> Result<Block, BlockpackError>
where
    T: PrimInt + Unsigned,
{
    if values.len() != BLOCK_SIZE {
        return Err(BlockpackError::BlockLengthMismatch {
            expected: BLOCK_SIZE,
            actual: values.len(),
        });
    }
    let mut block = [0u32; BLOCK_SIZE];
    for (index, (slot, &value)) in block.iter_mut().zip(values).enumerate() {
        *slot = value.to_u32().ok_or_else(|| BlockpackError::ValueOutOfRange {
            index,
            value: value.to_u128().unwrap_or(u128::MAX),
        })?;
    }
    Ok(block)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_from_u64_values() {
        let values: Vec<u64> = (0..BLOCK_SIZE as u64).map(|i| i * 1000).collect();
        let block = block_from_values(&values).unwrap();
        assert_eq!(block[5], 5000);

        let bytes = encode_block(&block).unwrap();
        assert_eq!(decode_block(&bytes).unwrap(), block);
    }

    #[test]
    fn test_block_from_values_rejects_wide_values() {
        let mut values = vec![0u64; BLOCK_SIZE];
        values[9] = 1 << 32;
        let result = block_from_values(&values);
        assert!(matches!(
            result,
            Err(BlockpackError::ValueOutOfRange { index: 9, value }) if value == 1 << 32
        ));
    }

    #[test]
    fn test_block_from_values_rejects_wrong_length() {
        let values = vec![1u16; BLOCK_SIZE - 1];
        let result = block_from_values(&values);
        assert!(matches!(
            result,
            Err(BlockpackError::BlockLengthMismatch { expected: 128, actual: 127 })
        ));
    }

    #[test]
    fn test_skip_block_reports_consumed_bytes() {
        let bytes = encode_block(&[3; BLOCK_SIZE]).unwrap();
        assert_eq!(skip_block(&bytes).unwrap(), 33);
        assert!(skip_block(&bytes[..32]).is_err());
    }
}
