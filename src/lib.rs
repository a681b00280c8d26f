//! This file is the root of the `blockpack` Rust crate.
//!
//! `blockpack` packs fixed blocks of 128 unsigned 32-bit integers at the minimal
//! bit width that holds every value, and reads them back. Each encoded block is a
//! one-byte width header followed by `2 * bits` big-endian 64-bit words, so a
//! reader can skip a block knowing only its header.
//!
//! Its responsibilities are strictly limited to:
//! 1.  Declaring the top-level modules of the library (`bridge`, `kernels`, etc.).
//! 2.  Re-exporting the small public surface most callers need.

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
//==================================================================================
// 1. Module Declarations
//==================================================================================
#[macro_use]
mod observability; // Make macros available throughout the crate

pub mod bridge;
pub mod config;
pub mod error;
pub mod io;
pub mod kernels;

//==================================================================================
// 2. Public Surface
//==================================================================================
pub use bridge::{
    block_from_values, decode_block, encode_block, encoded_len, peek_bit_width, skip_block,
    BlockCodec,
};
pub use config::{FormatDescriptor, PackedLayout, BLOCK_SIZE};
pub use error::BlockpackError;
pub use io::{ByteArrayInput, DataInput, DataOutput, ReaderInput};
pub use kernels::{BitWidth, Block, Bucket};
