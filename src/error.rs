// In: src/error.rs

//! This module defines the single, unified error type for the entire blockpack library.
//! It uses the `thiserror` crate to provide ergonomic, context-aware error handling.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BlockpackError {
    // =========================================================================
    // === Format Errors (a header or descriptor that cannot be honored)
    // =========================================================================
    #[error("Invalid bit width in block header: {0} (expected 0..=32)")]
    InvalidBitWidth(u8),

    #[error("Incompatible packed format: {0}")]
    IncompatibleFormat(String),

    // =========================================================================
    // === Caller Errors (precondition violations on encode)
    // =========================================================================
    #[error("Block length mismatch: expected {expected} values, got {actual}")]
    BlockLengthMismatch { expected: usize, actual: usize },

    #[error("Value {value} at index {index} does not fit in 32 bits")]
    ValueOutOfRange { index: usize, value: u128 },

    #[error("Bit width {requested} is too small for a block that requires {required} bits")]
    BitWidthTooSmall { requested: u32, required: u32 },

    // =========================================================================
    // === External Error Wrappers (Using #[from] for automatic conversion)
    // =========================================================================
    /// A short read, failed write or closed stream in the surrounding I/O layer.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An error from the Serde JSON library while (de)serializing a format descriptor.
    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),
}
