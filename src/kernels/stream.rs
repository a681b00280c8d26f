//! This module contains the generic bit-streaming engine.
//!
//! Every 64-bit cell produced by the transposer is `64 / bucket` sub-lanes that
//! travel together. Packing lays each cell's `bits`-wide fields end to end inside
//! `bucket`-bit sub-lanes of the output words, most significant bits first, and
//! splits a field across two words when it does not fit. Because a block always
//! has `2 * bucket` cells, the output is exactly `2 * bits` words with no padding.
//!
//! [`unpack_generic`] is the loop-based reference decoder. It handles any width
//! and is the fallback for widths without an unrolled decoder in
//! [`crate::kernels::specialized`].

use std::cmp::Ordering;

use crate::kernels::masks::lane_mask;
use crate::kernels::Bucket;

//==================================================================================
// 1. Packing
//==================================================================================

/// Streams the first `bucket.lanes()` cells of `lanes` into `words`, `bits` per field.
///
/// Every sub-lane value must already be below `2^bits`. Returns the number of
/// words written, which is always `2 * bits`.
///
/// # Panics
/// If `bits` exceeds the bucket width, or `words` is too short. Both are caller bugs.
pub fn pack(lanes: &[u64], bits: u32, bucket: Bucket, words: &mut [u64]) -> usize {
    let bucket_bits = bucket.bits();
    assert!(
        bits <= bucket_bits,
        "bit width {} does not fit bucket {}",
        bits,
        bucket_bits
    );
    if bits == 0 {
        return 0;
    }

    let width = bits as i32;
    let primitive = bucket_bits as i32;
    let mut written = 0;
    let mut next_word = 0u64;
    let mut bits_left = primitive;

    for &lane in &lanes[..bucket.lanes()] {
        bits_left -= width;
        match bits_left.cmp(&0) {
            Ordering::Greater => {
                next_word |= lane << bits_left;
            }
            Ordering::Equal => {
                next_word |= lane;
                words[written] = next_word;
                written += 1;
                next_word = 0;
                bits_left = primitive;
            }
            Ordering::Less => {
                // High part closes the current word, low part seeds the next one.
                let spill = -bits_left as u32;
                next_word |= (lane >> spill) & lane_mask(bucket_bits, bits - spill);
                words[written] = next_word;
                written += 1;
                next_word = (lane & lane_mask(bucket_bits, spill)) << (primitive + bits_left);
                bits_left += primitive;
            }
        }
    }

    assert_eq!(
        bits_left, primitive,
        "bit stream not word aligned after block ({} bits, bucket {})",
        bits, bucket_bits
    );
    written
}

//==================================================================================
// 2. Generic Unpacking (reference + fallback)
//==================================================================================

/// Reconstructs `bucket.lanes()` cells from a payload packed at `bits` per field.
///
/// Reads words on demand and extracts each field with the same split logic as
/// [`pack`]. `words` must hold at least `2 * bits` words.
pub fn unpack_generic(words: &[u64], bits: u32, bucket: Bucket, lanes: &mut [u64]) {
    let bucket_bits = bucket.bits();
    assert!(
        bits <= bucket_bits,
        "bit width {} does not fit bucket {}",
        bits,
        bucket_bits
    );
    let lanes = &mut lanes[..bucket.lanes()];
    if bits == 0 {
        lanes.fill(0);
        return;
    }

    let width = bits as i32;
    let primitive = bucket_bits as i32;
    let field_mask = lane_mask(bucket_bits, bits);
    let mut word_idx = 0;
    let mut current = words[0];
    let mut bits_left = primitive;

    for lane in lanes.iter_mut() {
        bits_left -= width;
        if bits_left < 0 {
            let low_bits = -bits_left as u32;
            word_idx += 1;
            let next = words[word_idx];
            *lane = ((current & lane_mask(bucket_bits, bits - low_bits)) << low_bits)
                | ((next >> (primitive + bits_left)) & lane_mask(bucket_bits, low_bits));
            current = next;
            bits_left += primitive;
        } else {
            *lane = (current >> bits_left) & field_mask;
        }
    }
}

/// The production fallback for widths without an unrolled decoder: the generic
/// loop fixed to bucket 32, two values per word.
pub fn unpack_fallback(bits: u32, words: &[u64], lanes: &mut [u64]) {
    unpack_generic(words, bits, Bucket::B32, lanes);
}

//==================================================================================
// 3. Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernels::{LaneArray, MAX_LANES, MAX_PACKED_WORDS};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_lanes(rng: &mut StdRng, bits: u32, bucket: Bucket) -> LaneArray {
        let mut lanes: LaneArray = [0; MAX_LANES];
        for lane in lanes[..bucket.lanes()].iter_mut() {
            *lane = rng.random::<u64>() & lane_mask(bucket.bits(), bits);
        }
        lanes
    }

    #[test]
    fn test_pack_emits_two_words_per_bit() {
        let mut rng = StdRng::seed_from_u64(3);
        for bits in 0..=32u32 {
            let bucket = Bucket::for_bits(bits);
            let lanes = random_lanes(&mut rng, bits, bucket);
            let mut words = [0u64; MAX_PACKED_WORDS];
            assert_eq!(pack(&lanes, bits, bucket, &mut words), 2 * bits as usize);
        }
    }

    #[test]
    fn test_pack_unpack_generic_roundtrip_all_widths() {
        let mut rng = StdRng::seed_from_u64(5);
        for bits in 0..=32u32 {
            let bucket = Bucket::for_bits(bits);
            let lanes = random_lanes(&mut rng, bits, bucket);
            let mut words = [0u64; MAX_PACKED_WORDS];
            let written = pack(&lanes, bits, bucket, &mut words);

            let mut restored: LaneArray = [u64::MAX; MAX_LANES];
            unpack_generic(&words[..written], bits, bucket, &mut restored);
            assert_eq!(
                restored[..bucket.lanes()],
                lanes[..bucket.lanes()],
                "width {}",
                bits
            );
        }
    }

    #[test]
    fn test_pack_crossing_word_boundary() {
        // Three-bit fields in bucket 8: the third field of every sub-lane is
        // split 2/1 between the first and second word.
        let mut lanes: LaneArray = [0; MAX_LANES];
        lanes[..16].fill(0x0707_0707_0707_0707);
        let mut words = [0u64; MAX_PACKED_WORDS];
        let written = pack(&lanes, 3, Bucket::B8, &mut words);
        assert_eq!(written, 6);
        assert!(words[..written].iter().all(|&w| w == u64::MAX));
    }

    #[test]
    fn test_narrow_widths_roundtrip_in_wider_bucket() {
        // A caller may pack below the bucket's natural range; the fallback
        // bucket is always 32.
        let mut rng = StdRng::seed_from_u64(9);
        let lanes = random_lanes(&mut rng, 5, Bucket::B32);
        let mut words = [0u64; MAX_PACKED_WORDS];
        let written = pack(&lanes, 5, Bucket::B32, &mut words);
        assert_eq!(written, 10);

        let mut restored: LaneArray = [0; MAX_LANES];
        unpack_fallback(5, &words[..written], &mut restored);
        assert_eq!(restored, lanes);
    }

    #[test]
    #[should_panic(expected = "does not fit bucket")]
    fn test_pack_rejects_width_wider_than_bucket() {
        let lanes: LaneArray = [0; MAX_LANES];
        let mut words = [0u64; MAX_PACKED_WORDS];
        pack(&lanes, 9, Bucket::B8, &mut words);
    }
}
