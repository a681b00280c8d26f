// In: src/bridge/mod.rs

// ====================================================================================
// ARCHITECTURAL OVERVIEW: The Bridge Layer
// ====================================================================================
//
// The `bridge` is the public-facing API of the blockpack library. It composes the
// pure `kernels` into whole-block operations over a caller-owned byte stream.
//
// Data Flow (Encode):
//
//   1. [BlockCodec::encode]        -> Receives `&Block` and a `DataOutput`
//         |
//         `-> a. kernels::bit_width   : minimal width, bucket
//         `-> b. kernels::transpose   : collapse into 8/16/32-bit lanes
//         `-> c. kernels::stream      : pack lanes into 2 * bits words
//         |
//   2. [DataOutput]                 -> header byte, then payload words
//
// Data Flow (Decode):
//
//   1. [BlockCodec::decode]        -> Receives a `DataInput`
//         |
//         `-> a. header byte -> BitWidth
//         `-> b. kernels::specialized : table dispatch to an unrolled decoder,
//         |                             or the generic fallback for wide blocks
//         `-> c. kernels::transpose   : expand lanes back into block order
//         |
//   2. Returns `Block`
//
// `BlockCodec::skip` reads only the header and skips `bits * 16` bytes.
//
// ====================================================================================
pub mod codec;
pub mod format;
pub mod stateless_api;

pub use codec::BlockCodec;
pub use format::{encoded_len, packed_len, peek_bit_width, HEADER_LEN, MAX_ENCODED_LEN};
pub use stateless_api::{block_from_values, decode_block, encode_block, skip_block};
