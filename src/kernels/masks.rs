//! Compile-time mask tables for the lane-parallel bit streaming kernels.
//!
//! A 64-bit word is treated as `64 / bucket` independent sub-lanes, so every
//! mask is the low-`bits` mask replicated into each sub-lane. The tables are
//! produced by `const` evaluation and never change after compilation.

/// Replicates a low-bit mask into every `bucket`-wide sub-lane of a word.
const fn expand_mask(low: u64, bucket: u32) -> u64 {
    let mut out = 0u64;
    let mut shift = 0;
    while shift < 64 {
        out |= low << shift;
        shift += bucket;
    }
    out
}

const fn build_table<const N: usize>(bucket: u32) -> [u64; N] {
    let mut table = [0u64; N];
    let mut bits = 1;
    while bits < N {
        table[bits] = expand_mask((1u64 << bits) - 1, bucket);
        bits += 1;
    }
    table
}

/// `MASKS8[n]`: low `n` bits set in each of the eight byte sub-lanes.
pub const MASKS8: [u64; 9] = build_table::<9>(8);
/// `MASKS16[n]`: low `n` bits set in each of the four 16-bit sub-lanes.
pub const MASKS16: [u64; 17] = build_table::<17>(16);
/// `MASKS32[n]`: low `n` bits set in both 32-bit halves.
pub const MASKS32: [u64; 33] = build_table::<33>(32);

/// Looks up the replicated mask of `bits` low bits for a bucket of `bucket` bits.
///
/// With constant arguments this folds down to a literal, which is what the
/// unrolled decoders rely on.
#[inline(always)]
pub const fn lane_mask(bucket: u32, bits: u32) -> u64 {
    match bucket {
        8 => MASKS8[bits as usize],
        16 => MASKS16[bits as usize],
        _ => MASKS32[bits as usize],
    }
}
