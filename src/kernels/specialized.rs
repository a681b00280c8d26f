//! Unrolled, branch-free block decoders, one per bit width.
//!
//! Each decoder is the generic unpack loop instantiated over a constant width and
//! fully unrolled with `seq!`: field `j` starts at stream bit `j * BITS`, so its
//! word index, shift amounts and masks are all compile-time constants and the
//! "does this field cross a word?" test folds away. What remains per field is a
//! load, one or two shifts and a mask.
//!
//! Widths `1..=MAX_SPECIALIZED_BITS_PER_VALUE` get an unrolled decoder; wider
//! widths go through [`stream::unpack_fallback`]. Width 0 is a zero fill. The
//! mapping is a plain table indexed by the header byte.

use seq_macro::seq;

use crate::config::{MAX_BITS_PER_VALUE, MAX_SPECIALIZED_BITS_PER_VALUE};
use crate::kernels::masks::lane_mask;
use crate::kernels::{stream, Bucket};

/// Signature shared by every table entry: `(bits, words, lanes)`.
pub type UnpackFn = fn(u32, &[u64], &mut [u64]);

//==================================================================================
// 1. Field Extraction
//==================================================================================

/// Extracts the `lane`-th `BITS`-wide field from a `BUCKET`-lane stream.
#[inline(always)]
fn extract<const BITS: u32, const BUCKET: u32>(words: &[u64], lane: usize) -> u64 {
    let start = lane as u32 * BITS;
    let word = (start / BUCKET) as usize;
    let end = start % BUCKET + BITS;
    if end <= BUCKET {
        (words[word] >> (BUCKET - end)) & lane_mask(BUCKET, BITS)
    } else {
        let low = end - BUCKET;
        ((words[word] & lane_mask(BUCKET, BITS - low)) << low)
            | ((words[word + 1] >> (BUCKET - low)) & lane_mask(BUCKET, low))
    }
}

//==================================================================================
// 2. Unrolled Decoders (one family per bucket)
//==================================================================================

fn unpack_bucket8<const BITS: u32>(bits: u32, words: &[u64], lanes: &mut [u64]) {
    debug_assert_eq!(bits, BITS);
    let words = &words[..2 * BITS as usize];
    let lanes = &mut lanes[..16];
    seq!(L in 0..16 {
        lanes[L] = extract::<BITS, 8>(words, L);
    });
}

fn unpack_bucket16<const BITS: u32>(bits: u32, words: &[u64], lanes: &mut [u64]) {
    debug_assert_eq!(bits, BITS);
    let words = &words[..2 * BITS as usize];
    let lanes = &mut lanes[..32];
    seq!(L in 0..32 {
        lanes[L] = extract::<BITS, 16>(words, L);
    });
}

fn unpack_bucket32<const BITS: u32>(bits: u32, words: &[u64], lanes: &mut [u64]) {
    debug_assert_eq!(bits, BITS);
    let words = &words[..2 * BITS as usize];
    let lanes = &mut lanes[..64];
    seq!(L in 0..64 {
        lanes[L] = extract::<BITS, 32>(words, L);
    });
}

fn zero_fill(_bits: u32, _words: &[u64], lanes: &mut [u64]) {
    lanes[..Bucket::B8.lanes()].fill(0);
}

seq!(W in 1..=8 {
    const BUCKET8_DECODERS: [UnpackFn; 8] = [#(unpack_bucket8::<W>,)*];
});

seq!(W in 9..=16 {
    const BUCKET16_DECODERS: [UnpackFn; 8] = [#(unpack_bucket16::<W>,)*];
});

seq!(W in 17..=24 {
    const BUCKET32_DECODERS: [UnpackFn; 8] = [#(unpack_bucket32::<W>,)*];
});

const _: () = assert!(
    MAX_SPECIALIZED_BITS_PER_VALUE as usize
        == BUCKET8_DECODERS.len() + BUCKET16_DECODERS.len() + BUCKET32_DECODERS.len()
);

//==================================================================================
// 3. Dispatch Table
//==================================================================================

const fn build_dispatch_table() -> [UnpackFn; MAX_BITS_PER_VALUE as usize + 1] {
    let mut table: [UnpackFn; MAX_BITS_PER_VALUE as usize + 1] =
        [stream::unpack_fallback as UnpackFn; MAX_BITS_PER_VALUE as usize + 1];
    table[0] = zero_fill;
    let mut i = 0;
    while i < 8 {
        table[1 + i] = BUCKET8_DECODERS[i];
        table[9 + i] = BUCKET16_DECODERS[i];
        table[17 + i] = BUCKET32_DECODERS[i];
        i += 1;
    }
    table
}

/// Width-indexed decoder table, immutable for the life of the process.
static DECODERS: [UnpackFn; MAX_BITS_PER_VALUE as usize + 1] = build_dispatch_table();

/// Whether `bits` has an unrolled decoder rather than the generic fallback.
#[inline]
pub const fn is_specialized(bits: u32) -> bool {
    bits >= 1 && bits <= MAX_SPECIALIZED_BITS_PER_VALUE
}

/// Decodes a `bits`-wide payload into the lanes of `Bucket::for_bits(bits)`.
///
/// `words` must hold at least `2 * bits` words.
///
/// # Panics
/// If `bits` is above 32; widths are validated when the header is read.
#[inline]
pub fn unpack(bits: u32, words: &[u64], lanes: &mut [u64]) {
    DECODERS[bits as usize](bits, words, lanes)
}

//==================================================================================
// 4. Unit Tests
//==================================================================================
