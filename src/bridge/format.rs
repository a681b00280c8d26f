// In: src/bridge/format.rs

//! Size arithmetic and header inspection for packed blocks.
//!
//! Everything here is derived from the single header byte, so a storage layer can
//! plan buffers or build skip tables without touching any payload.

use crate::error::BlockpackError;
use crate::kernels::BitWidth;

/// Size of the block header in bytes.
pub const HEADER_LEN: usize = 1;

/// Largest possible encoded block: header plus 64 words.
pub const MAX_ENCODED_LEN: usize = HEADER_LEN + 64 * 8;

/// Payload bytes following the header for a block of width `bits`.
#[inline]
pub fn packed_len(bits: BitWidth) -> usize {
    bits.packed_bytes()
}

/// Total encoded size, header included: `1 + 8 * ceil(128 * bits / 64)`.
#[inline]
pub fn encoded_len(bits: BitWidth) -> usize {
    HEADER_LEN + packed_len(bits)
}

/// Reads the width of the block starting at `bytes[0]` without consuming anything.
pub fn peek_bit_width(bytes: &[u8]) -> Result<BitWidth, BlockpackError> {
    let raw = *bytes.first().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "empty block buffer")
    })?;
    BitWidth::new(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoded_len_formula() {
        for raw in 0..=32u8 {
            let bits = BitWidth::new(raw).unwrap();
            let expected = 1 + 8 * (128 * raw as usize).div_ceil(64);
            assert_eq!(encoded_len(bits), expected);
        }
        assert_eq!(encoded_len(BitWidth::MAX), MAX_ENCODED_LEN);
    }

    #[test]
    fn test_peek_bit_width() {
        assert_eq!(peek_bit_width(&[7, 0, 0]).unwrap().get(), 7);
        assert!(matches!(
            peek_bit_width(&[40]),
            Err(BlockpackError::InvalidBitWidth(40))
        ));
        assert!(matches!(peek_bit_width(&[]), Err(BlockpackError::Io(_))));
    }
}
