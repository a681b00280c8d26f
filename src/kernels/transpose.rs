//! This module contains the lane transposition kernels.
//!
//! Before streaming, the 128 values of a block are regrouped so that each 64-bit
//! cell holds `64 / bucket` values taken with a fixed stride. The bit streamer
//! then moves every sub-lane of a cell in lock-step, so one shift/mask sequence
//! packs 2, 4 or 8 values at once regardless of the actual width inside the bucket.
//!
//! Cell `i` holds block indices `i, i + cells, i + 2 * cells, ...`, with the
//! lowest index in the most significant field.

use crate::kernels::{Block, Bucket};

//==================================================================================
// 1. Generic Core Logic
//==================================================================================

#[inline(always)]
fn collapse_by<const CELLS: usize, const FIELD_BITS: u32>(values: &Block, lanes: &mut [u64]) {
    let field_mask = u64::MAX >> (64 - FIELD_BITS);
    for (i, cell) in lanes[..CELLS].iter_mut().enumerate() {
        *cell = values[i..]
            .iter()
            .step_by(CELLS)
            .fold(0u64, |acc, &v| (acc << FIELD_BITS) | (u64::from(v) & field_mask));
    }
}

#[inline(always)]
fn expand_by<const CELLS: usize, const FIELD_BITS: u32>(lanes: &[u64], values: &mut Block) {
    let field_mask = u64::MAX >> (64 - FIELD_BITS);
    let per_cell = (64 / FIELD_BITS) as usize;
    for (i, &cell) in lanes[..CELLS].iter().enumerate() {
        for k in 0..per_cell {
            let shift = FIELD_BITS as usize * (per_cell - 1 - k);
            values[k * CELLS + i] = ((cell >> shift) & field_mask) as u32;
        }
    }
}

//==================================================================================
// 2. Public API
//==================================================================================

/// 16 cells of eight 8-bit fields, stride 16.
pub fn collapse8(values: &Block, lanes: &mut [u64]) {
    collapse_by::<16, 8>(values, lanes);
}

/// Inverse of [`collapse8`].
pub fn expand8(lanes: &[u64], values: &mut Block) {
    expand_by::<16, 8>(lanes, values);
}

/// 32 cells of four 16-bit fields, stride 32.
pub fn collapse16(values: &Block, lanes: &mut [u64]) {
    collapse_by::<32, 16>(values, lanes);
}

/// Inverse of [`collapse16`].
pub fn expand16(lanes: &[u64], values: &mut Block) {
    expand_by::<32, 16>(lanes, values);
}

/// 64 cells of two 32-bit halves, stride 64.
pub fn collapse32(values: &Block, lanes: &mut [u64]) {
    collapse_by::<64, 32>(values, lanes);
}

/// Inverse of [`collapse32`].
pub fn expand32(lanes: &[u64], values: &mut Block) {
    expand_by::<64, 32>(lanes, values);
}

/// Collapses `values` into the layout of `bucket`, filling `bucket.lanes()` cells.
#[inline]
pub fn collapse(bucket: Bucket, values: &Block, lanes: &mut [u64]) {
    match bucket {
        Bucket::B8 => collapse8(values, lanes),
        Bucket::B16 => collapse16(values, lanes),
        Bucket::B32 => collapse32(values, lanes),
    }
}

/// Expands the first `bucket.lanes()` cells back into block order.
#[inline]
pub fn expand(bucket: Bucket, lanes: &[u64], values: &mut Block) {
    match bucket {
        Bucket::B8 => expand8(lanes, values),
        Bucket::B16 => expand16(lanes, values),
        Bucket::B32 => expand32(lanes, values),
    }
}

//==================================================================================
// 3. Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BLOCK_SIZE;
    use crate::kernels::{LaneArray, MAX_LANES};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn sequential_block() -> Block {
        let mut block = [0u32; BLOCK_SIZE];
        for (i, v) in block.iter_mut().enumerate() {
            *v = i as u32;
        }
        block
    }

    #[test]
    fn test_collapse8_layout() {
        let block = sequential_block();
        let mut lanes: LaneArray = [0; MAX_LANES];
        collapse8(&block, &mut lanes);

        // Cell 0 holds indices 0, 16, ..., 112, most significant first.
        assert_eq!(lanes[0], 0x00_10_20_30_40_50_60_70);
        assert_eq!(lanes[15], 0x0F_1F_2F_3F_4F_5F_6F_7F);
        // Cells past the bucket's lane count are untouched.
        assert_eq!(lanes[16], 0);
    }

    #[test]
    fn test_collapse16_and_collapse32_layout() {
        let block = sequential_block();
        let mut lanes: LaneArray = [0; MAX_LANES];

        collapse16(&block, &mut lanes);
        assert_eq!(lanes[1], 0x0001_0021_0041_0061);

        collapse32(&block, &mut lanes);
        assert_eq!(lanes[0], 64);
        assert_eq!(lanes[63], (63u64 << 32) | 127);
    }

    #[test]
    fn test_collapse_truncates_to_field_width() {
        let block = [0x1FFu32; BLOCK_SIZE];
        let mut lanes: LaneArray = [0; MAX_LANES];
        collapse8(&block, &mut lanes);
        assert!(lanes[..16].iter().all(|&cell| cell == u64::MAX));
    }

    #[test]
    fn test_expand_inverts_collapse_for_every_bucket() {
        let mut rng = StdRng::seed_from_u64(11);
        for bucket in [Bucket::B8, Bucket::B16, Bucket::B32] {
            let max = u32::MAX >> (32 - bucket.bits());
            let mut block = [0u32; BLOCK_SIZE];
            for v in block.iter_mut() {
                *v = rng.random_range(0..=max);
            }

            let mut lanes: LaneArray = [0; MAX_LANES];
            collapse(bucket, &block, &mut lanes);
            let mut restored = [0u32; BLOCK_SIZE];
            expand(bucket, &lanes, &mut restored);
            assert_eq!(restored, block, "bucket {:?}", bucket);
        }
    }
}
